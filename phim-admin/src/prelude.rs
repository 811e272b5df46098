pub use crate::domains::associations::toggle;
pub use crate::domains::editor::{
    DraftAction, MovieEditor, ReferenceLists, update,
};
pub use crate::domains::episodes::{
    RowOutcome, create_episode_row, dedupe_episodes, refresh_episodes,
    remove_episode_row,
};
pub use crate::domains::forms::{
    CategoryForm, CountryForm, MovieForm, NewReference, ReferenceForm,
};
pub use crate::domains::library::MovieListState;
pub use crate::domains::sync::{MovieSaver, SaveError, SaveReport, SaveStage};
pub use crate::error::{AdminError, Result};
pub use crate::infrastructure::{ApiClient, ApiClientAdapter, CatalogApi};
pub use phim_model::prelude::*;
