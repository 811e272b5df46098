pub mod associations;
pub mod editor;
pub mod episodes;
pub mod forms;
pub mod library;
pub mod sync;
