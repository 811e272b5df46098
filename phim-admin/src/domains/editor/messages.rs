use phim_model::{Category, Country, Episode, EpisodeField, MovieDraft, RecordId};
use serde::{Deserialize, Serialize};

/// One edit of a movie draft.
///
/// Serialized adjacently tagged so a list of edits can be written by hand:
///
/// ```json
/// [
///   {"action": "set_name", "value": "Tay Du Ky"},
///   {"action": "add_episode"},
///   {"action": "set_episode_field", "value": [0, "slug", "tap-1"]},
///   {"action": "toggle_category", "value": 3}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum DraftAction {
    SetName(String),
    SetSlug(String),
    SetOriginName(String),
    SetPosterUrl(String),
    SetThumbUrl(String),
    SetYear(Option<i32>),
    SetType(String),
    SetStatus(String),
    SetTime(String),
    SetEpisodeCurrent(String),
    SetEpisodeTotal(String),
    SetView(u64),
    SetContent(String),

    AddActor,
    SetActor(usize, String),
    RemoveActor(usize),
    AddDirector,
    SetDirector(usize, String),
    RemoveDirector(usize),

    AddEpisode,
    SetEpisodeField(usize, EpisodeField, String),
    RemoveEpisode(usize),
    /// Replaces the whole episode list, e.g. after a refresh.
    ReplaceEpisodes(Vec<Episode>),

    ToggleCategory(RecordId),
    ToggleCountry(RecordId),

    Load(MovieDraft),
    /// Back to a blank form.
    Reset,
}

/// Authoritative category and country lists the editor selects from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceLists {
    pub categories: Vec<Category>,
    pub countries: Vec<Country>,
}
