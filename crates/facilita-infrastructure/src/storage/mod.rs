//! Storage layer: atomic document files and the file-backed key-value store.

mod atomic_file;
mod json_file_storage;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use json_file_storage::JsonFileStorage;
