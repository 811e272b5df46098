//! Flat snapshot of the model surface for presentation layers.

pub use super::episode::{Episode, EpisodeField};
pub use super::error::{PayloadError, ValidationError};
pub use super::ids::RecordId;
pub use super::movie::{
    ActivityEntry, MovieActivity, MovieDetail, MovieDraft, MoviePage,
    MovieSummary,
};
pub use super::reference::{
    Category, Country, NewCategory, NewCountry, Reference, ReferenceKind,
};
