//! Core data model definitions shared across the phim admin crates.
//!
//! Everything the backend sends passes through [`payload`] before it becomes
//! one of the strong types defined here.

pub mod episode;
pub mod error;
pub mod ids;
pub mod movie;
pub mod payload;
pub mod prelude;
pub mod reference;

pub use episode::{Episode, EpisodeField};
pub use error::{PayloadError, ValidationError};
pub use ids::RecordId;
pub use movie::{
    ActivityEntry, MovieActivity, MovieDetail, MovieDraft, MoviePage,
    MovieSummary,
};
pub use reference::{
    Category, Country, NewCategory, NewCountry, Reference, ReferenceKind,
};
