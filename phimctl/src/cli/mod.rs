pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "phimctl",
    version,
    about = "Administer the phim movie catalog"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// TOML config file (default: ./phim.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Env file read without touching the process environment
    /// (default: ./.env when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Catalog API base URL, overrides every other source
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout, e.g. "10s" or "1m"
    #[arg(long, global = true, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or add categories
    Categories {
        #[command(subcommand)]
        action: ReferenceAction,
    },
    /// List or add countries
    Countries {
        #[command(subcommand)]
        action: ReferenceAction,
    },
    /// Browse, create, edit and delete movies
    Movies {
        #[command(subcommand)]
        action: MovieAction,
    },
    /// Manage the episodes of one movie
    Episodes {
        #[command(subcommand)]
        action: EpisodeAction,
    },
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReferenceAction {
    /// Print every entry
    List,
    /// Create an entry
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum MovieAction {
    /// Print one page of the movie list
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print a movie with its episodes and activity
    Show {
        slug: String,
        /// Print the editable draft as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Create a movie from a JSON draft
    Create {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Edit a movie and save it
    Edit {
        slug: String,
        /// JSON array of draft actions to apply in order
        #[arg(long, value_name = "FILE")]
        actions: Option<PathBuf>,
        /// Select or deselect a category by id (repeatable)
        #[arg(long = "toggle-category", value_name = "ID")]
        toggle_category: Vec<String>,
        /// Select or deselect a country by id (repeatable)
        #[arg(long = "toggle-country", value_name = "ID")]
        toggle_country: Vec<String>,
        /// Print the edited draft instead of saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete a movie by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EpisodeAction {
    /// Print the episodes of a movie
    List { slug: String },
    /// Create one episode on a movie
    Add {
        /// Movie slug
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long = "episode-slug", value_name = "SLUG")]
        episode_slug: String,
        #[arg(long, default_value = "")]
        filename: String,
        #[arg(long, default_value = "")]
        link_embed: String,
        #[arg(long, default_value = "")]
        link_m3u8: String,
    },
    /// Delete one episode from a movie
    Remove {
        /// Movie slug
        slug: String,
        /// Episode id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration and where it came from
    Show,
}
