use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::RecordId;

/// One episode row of a movie.
///
/// `id` stays `None` until the backend has created the episode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Episode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub link_embed: String,
    #[serde(default)]
    pub link_m3u8: String,
}

/// Editable text fields of an [`Episode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeField {
    Name,
    Slug,
    Filename,
    LinkEmbed,
    LinkM3u8,
}

impl Episode {
    /// A fresh row as added from the editor, every field empty.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Slug when it carries text, `None` for an empty slug.
    pub fn slug_key(&self) -> Option<&str> {
        if self.slug.is_empty() {
            None
        } else {
            Some(&self.slug)
        }
    }

    pub fn field(&self, field: EpisodeField) -> &str {
        match field {
            EpisodeField::Name => &self.name,
            EpisodeField::Slug => &self.slug,
            EpisodeField::Filename => &self.filename,
            EpisodeField::LinkEmbed => &self.link_embed,
            EpisodeField::LinkM3u8 => &self.link_m3u8,
        }
    }

    pub fn set_field(&mut self, field: EpisodeField, value: String) {
        let slot = match field {
            EpisodeField::Name => &mut self.name,
            EpisodeField::Slug => &mut self.slug,
            EpisodeField::Filename => &mut self.filename,
            EpisodeField::LinkEmbed => &mut self.link_embed,
            EpisodeField::LinkM3u8 => &mut self.link_m3u8,
        };
        *slot = value;
    }

    /// An episode can only be created on its own when name and slug are set.
    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        ValidationError::check(&[("name", &self.name), ("slug", &self.slug)])
    }
}
