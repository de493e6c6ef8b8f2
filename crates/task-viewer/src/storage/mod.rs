//! Storage layer for reading generated task documents.

mod file;
mod traits;

pub use file::{read_json_document, FileStorage, TASKS_FILE_NAME, TASKS_KEY};
pub use traits::TaskSource;
