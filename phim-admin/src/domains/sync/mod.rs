//! Saving an edited movie.
//!
//! A save runs once, front to back:
//!
//! ```text
//! Idle -> PartitioningEpisodes -> CreatingUnsaved | SkipCreate
//!      -> Deduplicating -> UpdatingMovie -> Done
//! ```
//!
//! Episodes without an identifier are created in one batch first. Only when
//! that succeeds is the movie updated with the persisted episodes plus the
//! newly created ones, deduplicated. The caller's draft receives the
//! reconciled list only after the update went through.

use std::fmt;

use phim_model::{Episode, MovieDraft, RecordId};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domains::episodes::dedupe_episodes;
use crate::error::AdminError;
use crate::infrastructure::services::api::CatalogApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveStage {
    Idle,
    PartitioningEpisodes,
    CreatingUnsaved,
    SkipCreate,
    Deduplicating,
    UpdatingMovie,
    Done,
    Failed,
}

impl SaveStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, SaveStage::Done | SaveStage::Failed)
    }
}

impl fmt::Display for SaveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SaveStage::Idle => "checking the draft",
            SaveStage::PartitioningEpisodes => "partitioning episodes",
            SaveStage::CreatingUnsaved => "creating unsaved episodes",
            SaveStage::SkipCreate => "skipping episode creation",
            SaveStage::Deduplicating => "deduplicating episodes",
            SaveStage::UpdatingMovie => "updating the movie",
            SaveStage::Done => "done",
            SaveStage::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub movie_id: RecordId,
    /// Stages traversed, `Idle` through `Done`.
    pub stages: Vec<SaveStage>,
    /// Episodes the backend created during this save, with their ids.
    pub created: Vec<Episode>,
    /// Episodes on the movie after reconciliation.
    pub episode_count: usize,
}

/// A save that stopped early. The draft it was given is unchanged.
///
/// Validation problems and a missing movie id fail at `Idle`, before any
/// request is sent.
#[derive(Debug, Error)]
#[error("saving movie failed while {failed_at}")]
pub struct SaveError {
    pub failed_at: SaveStage,
    /// Stages traversed, ending in `Failed`.
    pub stages: Vec<SaveStage>,
    /// Episodes that were created before the movie update failed. They
    /// exist on the backend even though the save did not complete.
    pub created: Vec<Episode>,
    #[source]
    pub source: AdminError,
}

/// Stage bookkeeping for one save invocation.
#[derive(Debug)]
struct SaveRun {
    stages: Vec<SaveStage>,
}

impl SaveRun {
    fn start() -> Self {
        Self {
            stages: vec![SaveStage::Idle],
        }
    }

    fn current(&self) -> SaveStage {
        self.stages.last().copied().unwrap_or(SaveStage::Idle)
    }

    fn enter(&mut self, stage: SaveStage) {
        debug!(from = ?self.current(), to = ?stage, "save stage");
        self.stages.push(stage);
    }

    fn fail(self, source: AdminError, created: Vec<Episode>) -> SaveError {
        let failed_at = self.current();
        let mut stages = self.stages;
        stages.push(SaveStage::Failed);
        error!(
            stage = %failed_at,
            created = created.len(),
            error = %source,
            "movie save failed"
        );
        SaveError {
            failed_at,
            stages,
            created,
            source,
        }
    }
}

/// Persists a movie draft together with its episode list.
#[derive(Debug)]
pub struct MovieSaver<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A> MovieSaver<'a, A>
where
    A: CatalogApi + ?Sized,
{
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn save(
        &self,
        draft: &mut MovieDraft,
    ) -> Result<SaveReport, SaveError> {
        let mut run = SaveRun::start();

        if let Err(err) = draft.validate_for_submit() {
            return Err(run.fail(err.into(), Vec::new()));
        }
        let Some(movie_id) = draft.id.clone() else {
            return Err(run.fail(
                AdminError::MissingIdentifier { entity: "movie" },
                Vec::new(),
            ));
        };

        run.enter(SaveStage::PartitioningEpisodes);
        let (unsaved, saved): (Vec<Episode>, Vec<Episode>) = draft
            .episodes
            .iter()
            .cloned()
            .partition(|episode| !episode.is_persisted());

        let created = if unsaved.is_empty() {
            run.enter(SaveStage::SkipCreate);
            Vec::new()
        } else {
            run.enter(SaveStage::CreatingUnsaved);
            match self.api.create_episodes(&movie_id, &unsaved).await {
                Ok(created) => {
                    info!(
                        movie_id = %movie_id,
                        count = created.len(),
                        "unsaved episodes created"
                    );
                    created
                }
                Err(err) => return Err(run.fail(err, Vec::new())),
            }
        };

        run.enter(SaveStage::Deduplicating);
        let reconciled = dedupe_episodes(
            saved.into_iter().chain(created.iter().cloned()).collect(),
        );

        run.enter(SaveStage::UpdatingMovie);
        let payload = MovieDraft {
            episodes: reconciled,
            ..draft.clone()
        };
        if let Err(err) = self.api.update_movie(&movie_id, &payload).await {
            return Err(run.fail(err, created));
        }

        run.enter(SaveStage::Done);
        draft.episodes = payload.episodes;
        info!(
            movie_id = %movie_id,
            episodes = draft.episodes.len(),
            created = created.len(),
            "movie saved"
        );

        Ok(SaveReport {
            movie_id,
            stages: run.stages,
            created,
            episode_count: draft.episodes.len(),
        })
    }
}
