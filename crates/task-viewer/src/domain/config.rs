//! Configuration domain facade.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::entities::ViewerConfig;
use crate::errors::{ViewerError, ViewerResult};
use crate::storage::read_json_document;

/// Configuration document, relative to the base directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration domain facade
pub struct ConfigDomain {
    config_path: PathBuf,
}

impl ConfigDomain {
    /// Create a new config domain
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: base_dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration.
    ///
    /// `Ok(None)` means the file does not exist; callers warn and carry on
    /// with [`ViewerConfig::default`]. A document that is present but is
    /// not a JSON object is rejected.
    pub fn load(&self) -> ViewerResult<Option<ViewerConfig>> {
        match read_json_document(&self.config_path)? {
            None => Ok(None),
            Some(Value::Object(entries)) => {
                debug!(
                    "Loaded {} configuration key(s) from {}",
                    entries.len(),
                    self.config_path.display()
                );
                Ok(Some(ViewerConfig::new(entries)))
            }
            Some(_) => Err(ViewerError::UnexpectedShape {
                path: self.config_path.display().to_string(),
                expected: "a JSON object".to_string(),
            }),
        }
    }
}
