use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use phim_model::{
    Category, Country, Episode, MovieActivity, MovieDetail, MovieDraft,
    MoviePage, MovieSummary, NewCategory, NewCountry, RecordId,
};

use crate::error::{AdminError, Result};
use crate::infrastructure::services::api::CatalogApi;

/// First identifier handed out by the stub.
const FIRST_ID: i64 = 1000;

/// Catalog operation, used to inject failures and filter recorded calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListCategories,
    ListCountries,
    CreateCategory,
    CreateCountry,
    ListMovies,
    GetMovie,
    CreateMovie,
    UpdateMovie,
    DeleteMovie,
    ListEpisodes,
    CreateEpisodes,
    DeleteEpisode,
}

/// A call received by [`TestCatalogApi`], with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListCategories,
    ListCountries,
    CreateCategory(NewCategory),
    CreateCountry(NewCountry),
    ListMovies { page: u32 },
    GetMovie { slug: String },
    CreateMovie(MovieDraft),
    UpdateMovie { id: RecordId, draft: MovieDraft },
    DeleteMovie { id: RecordId },
    ListEpisodes { movie_id: RecordId },
    CreateEpisodes { movie_id: RecordId, episodes: Vec<Episode> },
    DeleteEpisode { movie_id: RecordId, episode_id: RecordId },
}

impl ApiCall {
    pub fn operation(&self) -> Operation {
        match self {
            ApiCall::ListCategories => Operation::ListCategories,
            ApiCall::ListCountries => Operation::ListCountries,
            ApiCall::CreateCategory(_) => Operation::CreateCategory,
            ApiCall::CreateCountry(_) => Operation::CreateCountry,
            ApiCall::ListMovies { .. } => Operation::ListMovies,
            ApiCall::GetMovie { .. } => Operation::GetMovie,
            ApiCall::CreateMovie(_) => Operation::CreateMovie,
            ApiCall::UpdateMovie { .. } => Operation::UpdateMovie,
            ApiCall::DeleteMovie { .. } => Operation::DeleteMovie,
            ApiCall::ListEpisodes { .. } => Operation::ListEpisodes,
            ApiCall::CreateEpisodes { .. } => Operation::CreateEpisodes,
            ApiCall::DeleteEpisode { .. } => Operation::DeleteEpisode,
        }
    }
}

#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    message: Option<String>,
}

/// In-memory catalog backend that records every call.
///
/// Episodes are stored per movie exactly as the stub receives them, so
/// duplicates written by a caller come back on the next read.
#[derive(Debug, Clone, Default)]
pub struct TestCatalogApi {
    inner: Arc<RwLock<InnerState>>,
}

#[derive(Debug, Default)]
struct InnerState {
    categories: Vec<Category>,
    countries: Vec<Country>,
    movies: Vec<MovieDetail>,
    episodes: HashMap<RecordId, Vec<Episode>>,
    pages: HashMap<u32, MoviePage>,
    failures: HashMap<Operation, Failure>,
    calls: Vec<ApiCall>,
    next_id: i64,
}

impl InnerState {
    fn allocate_id(&mut self) -> RecordId {
        if self.next_id < FIRST_ID {
            self.next_id = FIRST_ID;
        }
        let id = self.next_id;
        self.next_id += 1;
        RecordId::Number(id)
    }
}

impl TestCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, InnerState> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, InnerState> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `call` and returns the injected failure for it, if any.
    fn record(&self, call: ApiCall) -> Result<RwLockWriteGuard<'_, InnerState>> {
        let mut state = self.write();
        let operation = call.operation();
        state.calls.push(call);
        if let Some(failure) = state.failures.get(&operation) {
            return Err(AdminError::Rejected {
                status: failure.status,
                message: failure.message.clone(),
            });
        }
        Ok(state)
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.write().categories = categories;
    }

    pub fn set_countries(&self, countries: Vec<Country>) {
        self.write().countries = countries;
    }

    /// Stores a movie. Its draft must carry an id; its episodes become the
    /// stored episode list.
    pub fn insert_movie(&self, mut detail: MovieDetail) {
        let mut state = self.write();
        let id = match detail.draft.id.clone() {
            Some(id) => id,
            None => {
                let id = state.allocate_id();
                detail.draft.id = Some(id.clone());
                id
            }
        };
        let episodes = std::mem::take(&mut detail.draft.episodes);
        state.episodes.insert(id.clone(), episodes);
        state.movies.retain(|m| m.draft.id.as_ref() != Some(&id));
        state.movies.push(detail);
    }

    pub fn set_episodes(&self, movie_id: RecordId, episodes: Vec<Episode>) {
        self.write().episodes.insert(movie_id, episodes);
    }

    /// Overrides the response for `page` of the movie list.
    pub fn set_movie_page(&self, page: u32, response: MoviePage) {
        self.write().pages.insert(page, response);
    }

    /// Every later call of `operation` is rejected with `status`.
    pub fn fail(&self, operation: Operation, status: u16, message: Option<&str>) {
        self.write().failures.insert(
            operation,
            Failure {
                status,
                message: message.map(str::to_string),
            },
        );
    }

    pub fn clear_failure(&self, operation: Operation) {
        self.write().failures.remove(&operation);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.read().calls.clone()
    }

    pub fn calls_of(&self, operation: Operation) -> Vec<ApiCall> {
        self.read()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls_of(operation).len()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.read().calls.iter().map(ApiCall::operation).collect()
    }

    pub fn episodes(&self, movie_id: &RecordId) -> Vec<Episode> {
        self.read().episodes.get(movie_id).cloned().unwrap_or_default()
    }

    pub fn movie(&self, id: &RecordId) -> Option<MovieDraft> {
        let state = self.read();
        state
            .movies
            .iter()
            .find(|m| m.draft.id.as_ref() == Some(id))
            .map(|m| {
                let mut draft = m.draft.clone();
                draft.episodes =
                    state.episodes.get(id).cloned().unwrap_or_default();
                draft
            })
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    pub fn countries(&self) -> Vec<Country> {
        self.read().countries.clone()
    }
}

fn not_found() -> AdminError {
    AdminError::Rejected {
        status: 404,
        message: Some("not found".to_string()),
    }
}

fn summary(draft: &MovieDraft, id: RecordId) -> MovieSummary {
    MovieSummary {
        id,
        name: draft.name.clone(),
        slug: draft.slug.clone(),
        origin_name: draft.origin_name.clone(),
        poster_url: draft.poster_url.clone(),
        thumb_url: draft.thumb_url.clone(),
        year: draft.year,
        view: draft.view,
    }
}

#[async_trait]
impl CatalogApi for TestCatalogApi {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let state = self.record(ApiCall::ListCategories)?;
        Ok(state.categories.clone())
    }

    async fn list_countries(&self) -> Result<Vec<Country>> {
        let state = self.record(ApiCall::ListCountries)?;
        Ok(state.countries.clone())
    }

    async fn create_category(&self, category: &NewCategory) -> Result<()> {
        let mut state = self.record(ApiCall::CreateCategory(category.clone()))?;
        let id = state.allocate_id();
        state.categories.push(Category {
            id,
            name: category.name.clone(),
            slug: Some(category.slug.clone()),
        });
        Ok(())
    }

    async fn create_country(&self, country: &NewCountry) -> Result<()> {
        let mut state = self.record(ApiCall::CreateCountry(country.clone()))?;
        let id = state.allocate_id();
        state.countries.push(Country {
            id,
            name: country.name.clone(),
            slug: Some(country.slug.clone()),
        });
        Ok(())
    }

    async fn list_movies(&self, page: u32) -> Result<MoviePage> {
        let state = self.record(ApiCall::ListMovies { page })?;
        if let Some(response) = state.pages.get(&page) {
            return Ok(response.clone());
        }
        let items = if page == 1 {
            state
                .movies
                .iter()
                .filter_map(|m| {
                    m.draft.id.clone().map(|id| summary(&m.draft, id))
                })
                .collect()
        } else {
            Vec::new()
        };
        Ok(MoviePage {
            status: true,
            items,
            total_pages: 1,
        })
    }

    async fn get_movie(&self, slug: &str) -> Result<MovieDetail> {
        let state = self.record(ApiCall::GetMovie {
            slug: slug.to_string(),
        })?;
        let detail = state
            .movies
            .iter()
            .find(|m| m.draft.slug == slug)
            .ok_or_else(not_found)?;
        let mut detail = detail.clone();
        if let Some(id) = &detail.draft.id {
            detail.draft.episodes =
                state.episodes.get(id).cloned().unwrap_or_default();
        }
        Ok(detail)
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<()> {
        let mut state = self.record(ApiCall::CreateMovie(draft.clone()))?;
        let id = state.allocate_id();
        let mut stored = draft.clone();
        stored.id = Some(id.clone());
        let episodes = std::mem::take(&mut stored.episodes);
        state.episodes.insert(id, episodes);
        state.movies.push(MovieDetail {
            draft: stored,
            activity: MovieActivity::default(),
        });
        Ok(())
    }

    async fn update_movie(&self, id: &RecordId, draft: &MovieDraft) -> Result<()> {
        let mut state = self.record(ApiCall::UpdateMovie {
            id: id.clone(),
            draft: draft.clone(),
        })?;
        let detail = state
            .movies
            .iter_mut()
            .find(|m| m.draft.id.as_ref() == Some(id))
            .ok_or_else(not_found)?;
        let mut stored = draft.clone();
        stored.id = Some(id.clone());
        let episodes = std::mem::take(&mut stored.episodes);
        detail.draft = stored;
        state.episodes.insert(id.clone(), episodes);
        Ok(())
    }

    async fn delete_movie(&self, id: &RecordId) -> Result<()> {
        let mut state = self.record(ApiCall::DeleteMovie { id: id.clone() })?;
        let before = state.movies.len();
        state.movies.retain(|m| m.draft.id.as_ref() != Some(id));
        if state.movies.len() == before {
            return Err(not_found());
        }
        state.episodes.remove(id);
        Ok(())
    }

    async fn list_episodes(&self, movie_id: &RecordId) -> Result<Vec<Episode>> {
        let state = self.record(ApiCall::ListEpisodes {
            movie_id: movie_id.clone(),
        })?;
        Ok(state.episodes.get(movie_id).cloned().unwrap_or_default())
    }

    async fn create_episodes(
        &self,
        movie_id: &RecordId,
        episodes: &[Episode],
    ) -> Result<Vec<Episode>> {
        let mut state = self.record(ApiCall::CreateEpisodes {
            movie_id: movie_id.clone(),
            episodes: episodes.to_vec(),
        })?;
        let created: Vec<Episode> = episodes
            .iter()
            .map(|episode| Episode {
                id: Some(state.allocate_id()),
                ..episode.clone()
            })
            .collect();
        state
            .episodes
            .entry(movie_id.clone())
            .or_default()
            .extend(created.iter().cloned());
        Ok(created)
    }

    async fn delete_episode(
        &self,
        movie_id: &RecordId,
        episode_id: &RecordId,
    ) -> Result<()> {
        let mut state = self.record(ApiCall::DeleteEpisode {
            movie_id: movie_id.clone(),
            episode_id: episode_id.clone(),
        })?;
        let list = state.episodes.get_mut(movie_id).ok_or_else(not_found)?;
        let before = list.len();
        list.retain(|e| e.id.as_ref() != Some(episode_id));
        if list.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
