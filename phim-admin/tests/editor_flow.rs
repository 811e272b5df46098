//! Editor sessions driven against the in-memory catalog.

use phim_admin::infrastructure::testing::{Operation, TestCatalogApi};
use phim_admin::prelude::*;

fn seeded_catalog() -> TestCatalogApi {
    let api = TestCatalogApi::new();
    api.set_categories(vec![
        Category {
            id: RecordId::from(1),
            name: "Hanh dong".into(),
            slug: None,
        },
        Category {
            id: RecordId::from(2),
            name: "Vien tuong".into(),
            slug: None,
        },
    ]);
    api.set_countries(vec![Country {
        id: RecordId::from("cn"),
        name: "Trung Quoc".into(),
        slug: Some("trung-quoc".into()),
    }]);
    api.insert_movie(MovieDetail {
        draft: MovieDraft {
            id: Some(RecordId::from(10)),
            name: "Tay Du Ky".into(),
            slug: "tay-du-ky".into(),
            kind: "series".into(),
            categories: vec![Category {
                id: RecordId::from(1),
                name: "Hanh dong".into(),
                slug: None,
            }],
            episodes: vec![Episode {
                id: Some(RecordId::from(100)),
                name: "Tap 1".into(),
                slug: "tap-1".into(),
                ..Episode::blank()
            }],
            ..MovieDraft::default()
        },
        activity: MovieActivity::default(),
    });
    api
}

#[tokio::test]
async fn edit_session_round_trips_through_save() {
    let api = seeded_catalog();
    let mut editor = MovieEditor::open(&api, "tay-du-ky").await.unwrap();

    editor.apply_all([
        DraftAction::ToggleCategory(RecordId::from(1)),
        DraftAction::ToggleCategory(RecordId::from(2)),
        DraftAction::ToggleCountry(RecordId::from("cn")),
        DraftAction::AddEpisode,
        DraftAction::SetEpisodeField(1, EpisodeField::Name, "Tap 2".into()),
        DraftAction::SetEpisodeField(1, EpisodeField::Slug, "tap-2".into()),
    ]);
    let report = editor.save(&api).await.unwrap();

    assert_eq!(report.created.len(), 1);
    assert_eq!(
        api.operations(),
        vec![
            Operation::ListCategories,
            Operation::ListCountries,
            Operation::GetMovie,
            Operation::CreateEpisodes,
            Operation::UpdateMovie,
        ]
    );
    let stored = api.movie(&RecordId::from(10)).unwrap();
    assert_eq!(stored.categories.len(), 1);
    assert_eq!(stored.categories[0].id, RecordId::from(2));
    assert_eq!(stored.countries.len(), 1);
    assert_eq!(stored.episodes, editor.draft().episodes);
}

#[tokio::test]
async fn second_save_creates_nothing() {
    let api = seeded_catalog();
    let mut editor = MovieEditor::open(&api, "tay-du-ky").await.unwrap();
    editor.apply_all([
        DraftAction::AddEpisode,
        DraftAction::SetEpisodeField(1, EpisodeField::Slug, "tap-2".into()),
    ]);

    editor.save(&api).await.unwrap();
    editor.save(&api).await.unwrap();

    assert_eq!(api.call_count(Operation::CreateEpisodes), 1);
    assert_eq!(api.call_count(Operation::UpdateMovie), 2);
}

#[tokio::test]
async fn failed_update_leaves_editor_draft_as_edited() {
    let api = seeded_catalog();
    api.fail(Operation::UpdateMovie, 500, None);
    let mut editor = MovieEditor::open(&api, "tay-du-ky").await.unwrap();
    editor.apply_all([
        DraftAction::AddEpisode,
        DraftAction::SetEpisodeField(1, EpisodeField::Slug, "tap-2".into()),
    ]);
    let edited = editor.draft().clone();

    let err = editor.save(&api).await.unwrap_err();

    assert_eq!(err.failed_at, SaveStage::UpdatingMovie);
    assert_eq!(editor.draft(), &edited);
    // The created episode exists server-side and is reported.
    assert_eq!(err.created.len(), 1);
    assert_eq!(api.episodes(&RecordId::from(10)).len(), 2);
}

#[tokio::test]
async fn retry_after_failed_update_creates_the_row_again() {
    let api = seeded_catalog();
    api.fail(Operation::UpdateMovie, 503, None);
    let mut editor = MovieEditor::open(&api, "tay-du-ky").await.unwrap();
    editor.apply_all([
        DraftAction::AddEpisode,
        DraftAction::SetEpisodeField(1, EpisodeField::Slug, "tap-2".into()),
    ]);
    assert!(editor.save(&api).await.is_err());

    api.clear_failure(Operation::UpdateMovie);
    let report = editor.save(&api).await.unwrap();

    assert_eq!(report.stages.last(), Some(&SaveStage::Done));
    assert_eq!(api.call_count(Operation::CreateEpisodes), 2);
    let stored = api.movie(&RecordId::from(10)).unwrap();
    assert_eq!(stored.episodes.len(), 2);
    assert_eq!(stored.episodes, editor.draft().episodes);
}

#[tokio::test]
async fn per_row_actions_refresh_from_backend() {
    let api = seeded_catalog();
    let mut editor = MovieEditor::open(&api, "tay-du-ky").await.unwrap();
    editor.apply_all([
        DraftAction::AddEpisode,
        DraftAction::SetEpisodeField(1, EpisodeField::Name, "Tap 2".into()),
        DraftAction::SetEpisodeField(1, EpisodeField::Slug, "tap-2".into()),
        DraftAction::AddEpisode,
    ]);

    assert_eq!(
        editor.remove_episode(&api, 2).await.unwrap(),
        RowOutcome::RemovedLocally
    );
    assert_eq!(
        editor.create_episode(&api, 1).await.unwrap(),
        RowOutcome::Created
    );
    assert_eq!(editor.draft().episodes.len(), 2);
    assert!(editor.draft().episodes.iter().all(Episode::is_persisted));

    assert_eq!(
        editor.remove_episode(&api, 0).await.unwrap(),
        RowOutcome::RemovedRemotely
    );
    assert_eq!(editor.draft().episodes.len(), 1);
    assert_eq!(editor.draft().episodes[0].slug, "tap-2");
}
