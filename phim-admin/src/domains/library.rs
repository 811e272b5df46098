//! Paginated movie list.

use phim_model::{MoviePage, MovieSummary, RecordId};
use tracing::{info, warn};

use crate::error::Result;
use crate::infrastructure::services::api::CatalogApi;

/// The currently loaded page of the movie list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieListState {
    pub movies: Vec<MovieSummary>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for MovieListState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl MovieListState {
    /// Takes over `response` as page `page`, clamped to the page count the
    /// response reports. Unsuccessful responses are ignored; returns whether
    /// the page was applied.
    pub fn apply_page(&mut self, page: u32, response: MoviePage) -> bool {
        if !response.status {
            warn!(page, "movie list response unsuccessful, keeping current page");
            return false;
        }
        self.movies = response.items;
        self.total_pages = response.total_pages.max(1);
        self.current_page = page.clamp(1, self.total_pages);
        true
    }

    /// Steps back one page, never below the first.
    pub fn previous_page(&mut self) -> u32 {
        self.current_page = self.current_page.saturating_sub(1).max(1);
        self.current_page
    }

    /// Steps forward one page, never past the last.
    pub fn next_page(&mut self) -> u32 {
        if self.current_page < self.total_pages {
            self.current_page += 1;
        }
        self.current_page
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Fetches page `page` and applies it. A page past the end is replaced
    /// by the last page.
    pub async fn load<A>(&mut self, api: &A, page: u32) -> Result<bool>
    where
        A: CatalogApi + ?Sized,
    {
        let page = page.max(1);
        let response = api.list_movies(page).await?;
        if !self.apply_page(page, response) {
            return Ok(false);
        }
        if page > self.total_pages {
            let last = self.total_pages;
            warn!(page, total_pages = last, "page out of range, loading last page");
            let response = api.list_movies(last).await?;
            return Ok(self.apply_page(last, response));
        }
        Ok(true)
    }

    /// Deletes movie `id` on the backend, then drops it from the loaded page.
    pub async fn delete_movie<A>(&mut self, api: &A, id: &RecordId) -> Result<()>
    where
        A: CatalogApi + ?Sized,
    {
        api.delete_movie(id).await?;
        self.movies.retain(|movie| &movie.id != id);
        info!(movie_id = %id, "movie deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{Operation, TestCatalogApi};
    use phim_model::{MovieActivity, MovieDetail, MovieDraft};

    fn page(status: bool, total_pages: u32, ids: &[i64]) -> MoviePage {
        MoviePage {
            status,
            total_pages,
            items: ids
                .iter()
                .map(|id| MovieSummary {
                    id: RecordId::from(*id),
                    name: format!("Movie {id}"),
                    slug: format!("movie-{id}"),
                    origin_name: String::new(),
                    poster_url: String::new(),
                    thumb_url: String::new(),
                    year: None,
                    view: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn previous_on_first_page_stays() {
        let mut state = MovieListState::default();
        assert!(state.is_first_page());
        assert_eq!(state.previous_page(), 1);
    }

    #[test]
    fn next_on_last_page_stays() {
        let mut state = MovieListState::default();
        state.apply_page(1, page(true, 2, &[1]));
        assert_eq!(state.next_page(), 2);
        assert_eq!(state.next_page(), 2);
        assert!(state.is_last_page());
        assert_eq!(state.previous_page(), 1);
    }

    #[test]
    fn zero_total_pages_is_treated_as_one() {
        let mut state = MovieListState::default();
        state.apply_page(1, page(true, 0, &[]));
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.next_page(), 1);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let mut state = MovieListState::default();
        assert!(state.apply_page(99, page(true, 3, &[])));

        assert_eq!(state.current_page, 3);
        assert!(state.is_last_page());
        assert_eq!(state.next_page(), 3);
        assert_eq!(state.previous_page(), 2);
    }

    #[tokio::test]
    async fn load_past_the_end_fetches_last_page() {
        let api = TestCatalogApi::new();
        api.set_movie_page(5, page(true, 2, &[]));
        api.set_movie_page(2, page(true, 2, &[7, 8]));
        let mut state = MovieListState::default();

        assert!(state.load(&api, 5).await.unwrap());

        assert_eq!(state.current_page, 2);
        assert_eq!(state.movies.len(), 2);
        assert_eq!(api.call_count(Operation::ListMovies), 2);
    }

    #[test]
    fn unsuccessful_page_is_not_applied() {
        let mut state = MovieListState::default();
        state.apply_page(1, page(true, 3, &[1, 2]));
        let before = state.clone();

        assert!(!state.apply_page(2, page(false, 0, &[])));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn delete_drops_movie_from_loaded_page() {
        let api = TestCatalogApi::new();
        for id in [1, 2] {
            api.insert_movie(MovieDetail {
                draft: MovieDraft {
                    id: Some(RecordId::from(id)),
                    slug: format!("movie-{id}"),
                    ..MovieDraft::default()
                },
                activity: MovieActivity::default(),
            });
        }
        let mut state = MovieListState::default();
        assert!(state.load(&api, 1).await.unwrap());
        assert_eq!(state.movies.len(), 2);

        state.delete_movie(&api, &RecordId::from(1)).await.unwrap();

        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.movies[0].id, RecordId::from(2));
        assert_eq!(api.call_count(Operation::DeleteMovie), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let api = TestCatalogApi::new();
        api.set_movie_page(1, page(true, 1, &[1]));
        api.fail(Operation::DeleteMovie, 500, None);
        let mut state = MovieListState::default();
        state.load(&api, 1).await.unwrap();

        assert!(state.delete_movie(&api, &RecordId::from(1)).await.is_err());
        assert_eq!(state.movies.len(), 1);
    }
}
