//! Movie editor state.
//!
//! The draft is only ever changed through [`update`], which takes the current
//! draft and one [`DraftAction`] and returns the next draft.

pub mod messages;
pub mod update;

pub use messages::{DraftAction, ReferenceLists};
pub use update::update;

use phim_model::{MovieActivity, MovieDetail, MovieDraft};
use tracing::debug;

use crate::domains::episodes::{self, RowOutcome, dedupe_episodes};
use crate::domains::sync::{MovieSaver, SaveError, SaveReport};
use crate::error::Result;
use crate::infrastructure::services::api::CatalogApi;

/// One open movie: its draft, the reference lists it selects from and the
/// backend activity shown next to it.
#[derive(Debug, Clone, Default)]
pub struct MovieEditor {
    draft: MovieDraft,
    refs: ReferenceLists,
    activity: MovieActivity,
}

impl MovieEditor {
    pub fn new(refs: ReferenceLists) -> Self {
        Self {
            draft: MovieDraft::default(),
            refs,
            activity: MovieActivity::default(),
        }
    }

    /// Fetches the reference lists and the movie `slug`.
    pub async fn open<A>(api: &A, slug: &str) -> Result<Self>
    where
        A: CatalogApi + ?Sized,
    {
        let refs = ReferenceLists {
            categories: api.list_categories().await?,
            countries: api.list_countries().await?,
        };
        let detail = api.get_movie(slug).await?;
        let mut editor = Self::new(refs);
        editor.load(detail);
        Ok(editor)
    }

    /// Takes over a fetched movie; its episode list is deduplicated first.
    pub fn load(&mut self, detail: MovieDetail) {
        let MovieDetail { mut draft, activity } = detail;
        let fetched = draft.episodes.len();
        draft.episodes = dedupe_episodes(std::mem::take(&mut draft.episodes));
        debug!(
            slug = %draft.slug,
            fetched,
            kept = draft.episodes.len(),
            "movie loaded into editor"
        );
        self.activity = activity;
        self.apply(DraftAction::Load(draft));
    }

    pub fn apply(&mut self, action: DraftAction) {
        let current = std::mem::take(&mut self.draft);
        self.draft = update(current, action, &self.refs);
    }

    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = DraftAction>) {
        for action in actions {
            self.apply(action);
        }
    }

    pub fn draft(&self) -> &MovieDraft {
        &self.draft
    }

    pub fn references(&self) -> &ReferenceLists {
        &self.refs
    }

    pub fn activity(&self) -> &MovieActivity {
        &self.activity
    }

    /// Runs the save routine; the draft takes the reconciled episodes only
    /// when it succeeds.
    pub async fn save<A>(
        &mut self,
        api: &A,
    ) -> std::result::Result<SaveReport, SaveError>
    where
        A: CatalogApi + ?Sized,
    {
        MovieSaver::new(api).save(&mut self.draft).await
    }

    pub async fn create_episode<A>(
        &mut self,
        api: &A,
        index: usize,
    ) -> Result<RowOutcome>
    where
        A: CatalogApi + ?Sized,
    {
        episodes::create_episode_row(api, &mut self.draft, index).await
    }

    pub async fn remove_episode<A>(
        &mut self,
        api: &A,
        index: usize,
    ) -> Result<RowOutcome>
    where
        A: CatalogApi + ?Sized,
    {
        episodes::remove_episode_row(api, &mut self.draft, index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::TestCatalogApi;
    use phim_model::{Category, Episode, RecordId};

    #[tokio::test]
    async fn open_dedupes_fetched_episodes() {
        let api = TestCatalogApi::new();
        api.set_categories(vec![Category {
            id: RecordId::from(1),
            name: "Hai".into(),
            slug: None,
        }]);
        let dup = |name: &str| Episode {
            id: Some(RecordId::from(5)),
            name: name.into(),
            slug: "tap-1".into(),
            ..Episode::blank()
        };
        api.insert_movie(MovieDetail {
            draft: MovieDraft {
                id: Some(RecordId::from(7)),
                slug: "phim".into(),
                episodes: vec![dup("old"), dup("new")],
                ..MovieDraft::default()
            },
            activity: MovieActivity::default(),
        });

        let mut editor = MovieEditor::open(&api, "phim").await.unwrap();
        assert_eq!(editor.draft().episodes, vec![dup("new")]);

        editor.apply(DraftAction::ToggleCategory(RecordId::from(1)));
        assert_eq!(editor.draft().categories.len(), 1);
    }
}
