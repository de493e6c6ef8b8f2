//! File-based task source.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::traits::TaskSource;
use crate::entities::Task;
use crate::errors::{ViewerError, ViewerResult};

/// Document written by the task generator, relative to the base directory
pub const TASKS_FILE_NAME: &str = "generated_tasks_example.json";

/// Top-level key holding the task array
pub const TASKS_KEY: &str = "auto_generated_tasks";

/// Read and parse a JSON document.
///
/// Returns `Ok(None)` when the file does not exist. The file handle is
/// released before parsing starts, so it is closed on every path.
pub fn read_json_document(path: &Path) -> ViewerResult<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No document at {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(ViewerError::FileReadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ViewerError::MalformedDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Task source backed by the generator's example document
pub struct FileStorage {
    /// Path to generated_tasks_example.json
    tasks_file: PathBuf,
}

impl FileStorage {
    /// Storage reading from `base_dir` (`.taskmaster/` by default)
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            tasks_file: base_dir.as_ref().join(TASKS_FILE_NAME),
        }
    }

    pub fn tasks_file(&self) -> &Path {
        &self.tasks_file
    }

    /// Pull the task array out of a parsed document
    fn extract_tasks(&self, data: Value) -> ViewerResult<Vec<Task>> {
        let Value::Object(mut document) = data else {
            return Err(ViewerError::UnexpectedShape {
                path: self.tasks_file.display().to_string(),
                expected: "a JSON object".to_string(),
            });
        };

        match document.remove(TASKS_KEY) {
            None | Some(Value::Null) => {
                debug!("{} has no '{}' entry", self.tasks_file.display(), TASKS_KEY);
                Ok(Vec::new())
            }
            Some(raw) => {
                serde_json::from_value(raw).map_err(|e| ViewerError::MalformedDocument {
                    path: self.tasks_file.display().to_string(),
                    reason: format!("invalid '{TASKS_KEY}': {e}"),
                })
            }
        }
    }
}

impl TaskSource for FileStorage {
    fn location(&self) -> String {
        self.tasks_file.display().to_string()
    }

    fn load_tasks(&self) -> ViewerResult<Vec<Task>> {
        let Some(data) = read_json_document(&self.tasks_file)? else {
            return Ok(Vec::new());
        };

        let tasks = self.extract_tasks(data)?;
        debug!("Loaded {} task(s) from {}", tasks.len(), self.location());
        Ok(tasks)
    }
}
