//! Plain-text rendering for terminal output.

use phim_admin::domains::library::MovieListState;
use phim_admin::domains::sync::SaveReport;
use phim_config::Config;
use phim_model::{Episode, MovieActivity, MovieDraft, Reference};

pub fn print_references<R: Reference>(records: &[R]) {
    if records.is_empty() {
        println!("(no {} entries)", R::KIND);
        return;
    }
    for record in records {
        println!("{}\t{}", record.id(), record.name());
    }
}

pub fn print_movie_page(state: &MovieListState) {
    for movie in &state.movies {
        let year = movie.year.map(|y| y.to_string()).unwrap_or_default();
        println!(
            "{}\t{}\t{}\t{}\t{} views",
            movie.id, movie.slug, movie.name, year, movie.view
        );
    }
    let mut footer =
        format!("page {} of {}", state.current_page, state.total_pages);
    if !state.is_first_page() {
        let previous = state.current_page - 1;
        footer.push_str(&format!(", previous: --page {previous}"));
    }
    if !state.is_last_page() {
        let next = state.current_page + 1;
        footer.push_str(&format!(", next: --page {next}"));
    }
    println!("{footer}");
}

pub fn print_episodes(episodes: &[Episode]) {
    if episodes.is_empty() {
        println!("(no episodes)");
        return;
    }
    for (index, episode) in episodes.iter().enumerate() {
        let id = episode
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unsaved".to_string());
        println!(
            "{index}\t{id}\t{}\t{}\t{}",
            episode.slug, episode.name, episode.link_m3u8
        );
    }
}

pub fn print_movie(draft: &MovieDraft, activity: &MovieActivity) {
    let id = draft.id.as_ref().map(ToString::to_string).unwrap_or_default();
    println!("{} ({})", draft.name, draft.slug);
    println!("  id:         {id}");
    println!("  original:   {}", draft.origin_name);
    println!("  type:       {}", draft.kind);
    println!("  status:     {}", draft.status);
    if let Some(year) = draft.year {
        println!("  year:       {year}");
    }
    println!("  time:       {}", draft.time);
    println!(
        "  episodes:   {} / {}",
        draft.episode_current, draft.episode_total
    );
    println!("  views:      {}", draft.view);
    println!("  actors:     {}", draft.actor.join(", "));
    println!("  directors:  {}", draft.director.join(", "));
    let names = |names: Vec<&str>| names.join(", ");
    println!(
        "  categories: {}",
        names(draft.categories.iter().map(|c| c.name.as_str()).collect())
    );
    println!(
        "  countries:  {}",
        names(draft.countries.iter().map(|c| c.name.as_str()).collect())
    );
    if let Some(modified) = &activity.modified {
        println!("  modified:   {modified}");
    }
    if !draft.content.is_empty() {
        println!();
        println!("{}", draft.content);
    }

    println!();
    println!("Episodes:");
    print_episodes(&draft.episodes);

    if !activity.comments.is_empty() {
        println!();
        println!("Comments:");
        for entry in &activity.comments {
            let at = entry.created_at.map(|t| t.to_string()).unwrap_or_default();
            println!("  {}\t{at}", entry.username);
        }
    }
    if !activity.favorites.is_empty() {
        println!();
        println!("Favorited by:");
        for entry in &activity.favorites {
            let at = entry.created_at.map(|t| t.to_string()).unwrap_or_default();
            println!("  {}\t{at}", entry.username);
        }
    }
}

pub fn print_save_report(report: &SaveReport) {
    println!(
        "Movie {} saved: {} episodes, {} created",
        report.movie_id,
        report.episode_count,
        report.created.len()
    );
}

pub fn print_config(config: &Config) {
    println!("base_url        = {}", config.api.base_url);
    println!(
        "request_timeout = {}",
        humantime::format_duration(config.api.request_timeout)
    );
    println!("movies          = {}", config.routes.movies);
    println!("movies_list     = {}", config.routes.movies_list);
    println!("categories      = {}", config.routes.categories);
    println!("countries       = {}", config.routes.countries);
    println!("episodes_root   = {}", config.routes.episodes_root);
    let sources: Vec<String> = config
        .metadata
        .sources
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("sources         = {}", sources.join(" < "));
}
