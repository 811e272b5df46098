//! Catalog service trait
//!
//! Every domain operation talks to the backend through [`CatalogApi`], so the
//! HTTP adapter and the in-memory stub are interchangeable.

use async_trait::async_trait;
use phim_model::{
    Category, Country, Episode, MovieDetail, MovieDraft, MoviePage,
    NewCategory, NewCountry, RecordId,
};

use crate::error::Result;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn list_countries(&self) -> Result<Vec<Country>>;

    async fn create_category(&self, category: &NewCategory) -> Result<()>;

    async fn create_country(&self, country: &NewCountry) -> Result<()>;

    /// One page of the movie list, 1-based.
    async fn list_movies(&self, page: u32) -> Result<MoviePage>;

    /// Full record by slug, episodes included (not yet deduplicated).
    async fn get_movie(&self, slug: &str) -> Result<MovieDetail>;

    /// Creates a movie from a form draft. The draft is sent together with
    /// the ids of its categories and countries.
    async fn create_movie(&self, draft: &MovieDraft) -> Result<()>;

    /// Replaces the movie `id` with `draft`.
    async fn update_movie(&self, id: &RecordId, draft: &MovieDraft) -> Result<()>;

    async fn delete_movie(&self, id: &RecordId) -> Result<()>;

    async fn list_episodes(&self, movie_id: &RecordId) -> Result<Vec<Episode>>;

    /// Creates `episodes` in one request; the result carries identifiers and
    /// keeps request order.
    async fn create_episodes(
        &self,
        movie_id: &RecordId,
        episodes: &[Episode],
    ) -> Result<Vec<Episode>>;

    async fn delete_episode(
        &self,
        movie_id: &RecordId,
        episode_id: &RecordId,
    ) -> Result<()>;
}
