//! Single-row episode actions from the editor, outside of a full save.

use phim_model::{MovieDraft, RecordId};
use tracing::{debug, info};

use crate::domains::episodes::dedupe_episodes;
use crate::error::{AdminError, Result};
use crate::infrastructure::services::api::CatalogApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Created,
    RemovedRemotely,
    /// The row was never persisted and was only dropped from the draft.
    RemovedLocally,
    /// Index past the end of the episode list; nothing happened.
    NoSuchRow,
}

fn movie_id(draft: &MovieDraft) -> Result<RecordId> {
    draft
        .id
        .clone()
        .ok_or(AdminError::MissingIdentifier { entity: "movie" })
}

/// Replaces the draft's episodes with the backend's list, deduplicated.
pub async fn refresh_episodes<A>(api: &A, draft: &mut MovieDraft) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    let id = movie_id(draft)?;
    let fetched = api.list_episodes(&id).await?;
    let count = fetched.len();
    draft.episodes = dedupe_episodes(fetched);
    debug!(
        movie_id = %id,
        fetched = count,
        kept = draft.episodes.len(),
        "episode list refreshed"
    );
    Ok(())
}

/// Creates the episode at `index` on its own, then refreshes the list.
///
/// Name and slug must be filled; nothing is sent otherwise.
pub async fn create_episode_row<A>(
    api: &A,
    draft: &mut MovieDraft,
    index: usize,
) -> Result<RowOutcome>
where
    A: CatalogApi + ?Sized,
{
    let Some(episode) = draft.episodes.get(index) else {
        return Ok(RowOutcome::NoSuchRow);
    };
    episode.validate_for_create()?;
    let id = movie_id(draft)?;

    let created = api
        .create_episodes(&id, std::slice::from_ref(episode))
        .await?;
    info!(movie_id = %id, count = created.len(), "episode created");

    refresh_episodes(api, draft).await?;
    Ok(RowOutcome::Created)
}

/// Removes the episode at `index`.
///
/// A row without an identifier only exists locally and is spliced out of
/// the draft. A persisted row is deleted on the backend and the list is
/// refreshed afterwards.
pub async fn remove_episode_row<A>(
    api: &A,
    draft: &mut MovieDraft,
    index: usize,
) -> Result<RowOutcome>
where
    A: CatalogApi + ?Sized,
{
    let Some(episode) = draft.episodes.get(index) else {
        return Ok(RowOutcome::NoSuchRow);
    };
    let Some(episode_id) = episode.id.clone() else {
        draft.episodes.remove(index);
        return Ok(RowOutcome::RemovedLocally);
    };
    let id = movie_id(draft)?;

    api.delete_episode(&id, &episode_id).await?;
    info!(movie_id = %id, episode_id = %episode_id, "episode removed");

    refresh_episodes(api, draft).await?;
    Ok(RowOutcome::RemovedRemotely)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{Operation, TestCatalogApi};
    use phim_model::{Episode, MovieActivity, MovieDetail};

    fn ep(slug: &str, id: Option<i64>) -> Episode {
        Episode {
            id: id.map(RecordId::from),
            name: format!("Tap {slug}"),
            slug: slug.into(),
            ..Episode::blank()
        }
    }

    fn seeded(episodes: Vec<Episode>) -> (TestCatalogApi, MovieDraft) {
        let draft = MovieDraft {
            id: Some(RecordId::from(1)),
            name: "Movie".into(),
            slug: "movie".into(),
            kind: "series".into(),
            episodes,
            ..MovieDraft::default()
        };
        let api = TestCatalogApi::new();
        api.insert_movie(MovieDetail {
            draft: draft.clone(),
            activity: MovieActivity::default(),
        });
        (api, draft)
    }

    #[tokio::test]
    async fn blank_row_is_rejected_before_any_request() {
        let (api, mut draft) = seeded(vec![]);
        draft.episodes.push(Episode::blank());

        let err = create_episode_row(&api, &mut draft, 0).await.unwrap_err();
        assert!(err.is_validation());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn created_row_is_followed_by_a_refresh() {
        let (api, mut draft) = seeded(vec![ep("e1", Some(5))]);
        draft.episodes.push(ep("e2", None));

        let outcome = create_episode_row(&api, &mut draft, 1).await.unwrap();

        assert_eq!(outcome, RowOutcome::Created);
        assert_eq!(
            api.operations(),
            vec![Operation::CreateEpisodes, Operation::ListEpisodes]
        );
        assert_eq!(draft.episodes.len(), 2);
        assert!(draft.episodes.iter().all(Episode::is_persisted));
    }

    #[tokio::test]
    async fn unsaved_row_is_removed_locally() {
        let (api, mut draft) = seeded(vec![ep("e1", Some(5))]);
        draft.episodes.push(ep("e2", None));

        let outcome = remove_episode_row(&api, &mut draft, 1).await.unwrap();

        assert_eq!(outcome, RowOutcome::RemovedLocally);
        assert_eq!(draft.episodes, vec![ep("e1", Some(5))]);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn persisted_row_is_deleted_then_refreshed() {
        let (api, mut draft) = seeded(vec![ep("e1", Some(5)), ep("e2", Some(6))]);

        let outcome = remove_episode_row(&api, &mut draft, 0).await.unwrap();

        assert_eq!(outcome, RowOutcome::RemovedRemotely);
        assert_eq!(draft.episodes, vec![ep("e2", Some(6))]);
        assert_eq!(
            api.operations(),
            vec![Operation::DeleteEpisode, Operation::ListEpisodes]
        );
    }

    #[tokio::test]
    async fn failed_delete_leaves_draft_untouched() {
        let (api, mut draft) = seeded(vec![ep("e1", Some(5))]);
        api.fail(Operation::DeleteEpisode, 500, None);
        let before = draft.clone();

        assert!(remove_episode_row(&api, &mut draft, 0).await.is_err());
        assert_eq!(draft, before);
        assert_eq!(api.call_count(Operation::ListEpisodes), 0);
    }

    #[tokio::test]
    async fn refresh_collapses_backend_duplicates() {
        let (api, mut draft) = seeded(vec![]);
        let mut repeated = ep("e1", Some(8));
        repeated.name = "Tap 1 (fixed)".into();
        api.set_episodes(
            RecordId::from(1),
            vec![ep("e1", Some(7)), ep("e2", Some(9)), repeated.clone()],
        );

        refresh_episodes(&api, &mut draft).await.unwrap();

        assert_eq!(draft.episodes, vec![repeated, ep("e2", Some(9))]);
    }

    #[tokio::test]
    async fn out_of_range_index_is_ignored() {
        let (api, mut draft) = seeded(vec![]);
        let outcome = remove_episode_row(&api, &mut draft, 3).await.unwrap();
        assert_eq!(outcome, RowOutcome::NoSuchRow);
        assert!(api.calls().is_empty());
    }
}
