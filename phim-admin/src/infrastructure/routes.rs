//! Catalog API endpoints.
//!
//! Paths are relative to the configured base URL and come from
//! [`RouteConfig`], so deployments that mount the catalog elsewhere only
//! need a config change.

use std::fmt;

use phim_config::RouteConfig;
use phim_model::RecordId;

/// Query parameter carrying the 1-based page number of the movie list.
pub const PAGE_QUERY: &str = "page";

/// Path segment under `{episodes_root}/{movieId}`.
pub const EPISODES_SEGMENT: &str = "episodes";

/// Request path kept as separate segments.
///
/// Configured routes are split on `/` once. Identifiers and slugs are
/// appended whole, so each occupies exactly one segment whatever it
/// contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    pub fn route(route: &str) -> Self {
        Self {
            segments: route
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    config: RouteConfig,
}

impl Default for Routes {
    fn default() -> Self {
        Self::new(RouteConfig::default())
    }
}

impl Routes {
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    /// `GET` lists, `POST` creates.
    pub fn categories(&self) -> ApiPath {
        ApiPath::route(&self.config.categories)
    }

    /// `GET` lists, `POST` creates.
    pub fn countries(&self) -> ApiPath {
        ApiPath::route(&self.config.countries)
    }

    /// `GET ?page=N`
    pub fn movie_list(&self) -> ApiPath {
        ApiPath::route(&self.config.movies_list)
    }

    /// `POST` creates a movie.
    pub fn movies(&self) -> ApiPath {
        ApiPath::route(&self.config.movies)
    }

    /// `GET` the full record by slug.
    pub fn movie_by_slug(&self, slug: &str) -> ApiPath {
        self.movies().segment(slug)
    }

    /// `PUT` updates, `DELETE` removes.
    pub fn movie_by_id(&self, id: &RecordId) -> ApiPath {
        self.movies().segment(id.to_string())
    }

    /// `GET` lists, `POST` creates a batch.
    pub fn episodes(&self, movie_id: &RecordId) -> ApiPath {
        ApiPath::route(&self.config.episodes_root)
            .segment(movie_id.to_string())
            .segment(EPISODES_SEGMENT)
    }

    /// `DELETE` one episode.
    pub fn episode(&self, movie_id: &RecordId, episode_id: &RecordId) -> ApiPath {
        self.episodes(movie_id).segment(episode_id.to_string())
    }
}
