//! Repository layer: one zero-sized struct per table, with associated
//! async functions taking a `&PgPool`.

pub mod folder_repo;
pub mod note_repo;

pub use folder_repo::FolderRepo;
pub use note_repo::NoteRepo;
