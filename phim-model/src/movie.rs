use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::episode::Episode;
use crate::error::ValidationError;
use crate::ids::RecordId;
use crate::reference::{Category, Country};

/// A movie being created or edited, serialized exactly as the backend
/// expects it on `POST` and `PUT`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovieDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub origin_name: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    /// Running time as entered, e.g. `"45 phút/tập"`.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub episode_current: String,
    #[serde(default)]
    pub episode_total: String,
    #[serde(default)]
    pub view: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub actor: Vec<String>,
    #[serde(default)]
    pub director: Vec<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl MovieDraft {
    /// Blank form as presented for a new movie: one empty actor, director
    /// and episode row ready to be filled in.
    pub fn new_form() -> Self {
        Self {
            actor: vec![String::new()],
            director: vec![String::new()],
            episodes: vec![Episode::blank()],
            ..Self::default()
        }
    }

    /// Name, slug and type must be filled before the draft is submitted.
    pub fn validate_for_submit(&self) -> Result<(), ValidationError> {
        ValidationError::check(&[
            ("name", &self.name),
            ("slug", &self.slug),
            ("type", &self.kind),
        ])
    }

    pub fn category_ids(&self) -> Vec<RecordId> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    pub fn country_ids(&self) -> Vec<RecordId> {
        self.countries.iter().map(|c| c.id.clone()).collect()
    }

    pub fn unsaved_episode_count(&self) -> usize {
        self.episodes.iter().filter(|e| !e.is_persisted()).count()
    }
}

/// One row of the paginated movie list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: RecordId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub origin_name: String,
    #[serde(default)]
    pub poster_url: String,
    #[serde(default)]
    pub thumb_url: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub view: u64,
}

/// Response of the movie list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePage {
    pub status: bool,
    pub items: Vec<MovieSummary>,
    pub total_pages: u32,
}

/// Someone who commented on or favorited a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub username: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Read-only activity the backend attaches to a movie. Displayed by the
/// editor, never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovieActivity {
    pub comments: Vec<ActivityEntry>,
    pub favorites: Vec<ActivityEntry>,
    pub modified: Option<String>,
}

/// A fully loaded movie: the editable draft plus its activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetail {
    pub draft: MovieDraft,
    pub activity: MovieActivity,
}
