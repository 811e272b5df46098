//! [`ApiClient`] adapter that implements [`CatalogApi`]
//!
//! Maps the catalog operations onto configured routes and runs every
//! response through the payload normalization boundary.

use std::sync::Arc;

use async_trait::async_trait;
use phim_config::Config;
use phim_model::{
    Category, Country, Episode, MovieDetail, MovieDraft, MoviePage,
    NewCategory, NewCountry, RecordId, payload,
};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::infrastructure::ApiClient;
use crate::infrastructure::routes::{PAGE_QUERY, Routes};
use crate::infrastructure::services::api::CatalogApi;

/// Body element of `POST /<movies>`: the draft plus the bare reference ids.
#[derive(Debug, Serialize)]
struct CreateMovieRequest<'a> {
    #[serde(flatten)]
    draft: &'a MovieDraft,
    #[serde(rename = "categoryIds")]
    category_ids: Vec<RecordId>,
    #[serde(rename = "countryIds")]
    country_ids: Vec<RecordId>,
}

#[derive(Debug, Clone)]
pub struct ApiClientAdapter {
    client: Arc<ApiClient>,
    routes: Routes,
}

impl ApiClientAdapter {
    pub fn new(client: Arc<ApiClient>, routes: Routes) -> Self {
        Self { client, routes }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self::new(Arc::new(client), Routes::new(config.routes.clone())))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl CatalogApi for ApiClientAdapter {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let body = self.client.get(&self.routes.categories(), None).await?;
        Ok(payload::category_list(&body)?)
    }

    async fn list_countries(&self) -> Result<Vec<Country>> {
        let body = self.client.get(&self.routes.countries(), None).await?;
        Ok(payload::country_list(&body)?)
    }

    async fn create_category(&self, category: &NewCategory) -> Result<()> {
        self.client.post(&self.routes.categories(), category).await?;
        info!(slug = %category.slug, "category created");
        Ok(())
    }

    async fn create_country(&self, country: &NewCountry) -> Result<()> {
        self.client.post(&self.routes.countries(), country).await?;
        info!(slug = %country.slug, "country created");
        Ok(())
    }

    async fn list_movies(&self, page: u32) -> Result<MoviePage> {
        let page_param = page.to_string();
        let body = self
            .client
            .get(&self.routes.movie_list(), Some((PAGE_QUERY, &page_param)))
            .await?;
        Ok(payload::movie_page(&body)?)
    }

    async fn get_movie(&self, slug: &str) -> Result<MovieDetail> {
        let body = self.client.get(&self.routes.movie_by_slug(slug), None).await?;
        Ok(payload::movie_detail(&body)?)
    }

    async fn create_movie(&self, draft: &MovieDraft) -> Result<()> {
        let request = [CreateMovieRequest {
            draft,
            category_ids: draft.category_ids(),
            country_ids: draft.country_ids(),
        }];
        self.client.post(&self.routes.movies(), &request).await?;
        Ok(())
    }

    async fn update_movie(&self, id: &RecordId, draft: &MovieDraft) -> Result<()> {
        self.client.put(&self.routes.movie_by_id(id), draft).await
    }

    async fn delete_movie(&self, id: &RecordId) -> Result<()> {
        self.client.delete(&self.routes.movie_by_id(id)).await
    }

    async fn list_episodes(&self, movie_id: &RecordId) -> Result<Vec<Episode>> {
        let body = self.client.get(&self.routes.episodes(movie_id), None).await?;
        Ok(payload::episode_list(&body)?)
    }

    async fn create_episodes(
        &self,
        movie_id: &RecordId,
        episodes: &[Episode],
    ) -> Result<Vec<Episode>> {
        let body = self
            .client
            .post(&self.routes.episodes(movie_id), episodes)
            .await?;
        Ok(payload::episode_list(&body)?)
    }

    async fn delete_episode(
        &self,
        movie_id: &RecordId,
        episode_id: &RecordId,
    ) -> Result<()> {
        self.client
            .delete(&self.routes.episode(movie_id, episode_id))
            .await
    }
}
