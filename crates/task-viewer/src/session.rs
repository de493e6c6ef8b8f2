//! The loaded, read-only state a report is rendered from.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::ConfigDomain;
use crate::entities::{Task, ViewerConfig};
use crate::errors::ViewerResult;
use crate::storage::{FileStorage, TaskSource};

/// Directory the generator writes to, relative to the working directory
pub const DEFAULT_BASE_DIR: &str = ".taskmaster";

/// Configuration and tasks, loaded once at startup and never changed.
///
/// Command handlers borrow the session; nothing in it is mutable after
/// [`Session::load`] returns.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ViewerConfig,
    /// Where the configuration was expected, set only when it was missing
    missing_config: Option<PathBuf>,
    tasks: Vec<Task>,
}

impl Session {
    /// Load `config.json` and the generated tasks from `base_dir`
    pub fn load(base_dir: impl AsRef<Path>) -> ViewerResult<Self> {
        let base_dir = base_dir.as_ref();
        let storage = FileStorage::new(base_dir);
        Self::load_from(&ConfigDomain::new(base_dir), &storage)
    }

    /// Load from an explicit configuration location and task source
    pub fn load_from(config: &ConfigDomain, source: &dyn TaskSource) -> ViewerResult<Self> {
        let (config, missing_config) = match config.load()? {
            Some(loaded) => (loaded, None),
            None => (
                ViewerConfig::default(),
                Some(config.config_path().to_path_buf()),
            ),
        };

        let tasks = source.load_tasks()?;
        info!("Loaded {} task(s) from {}", tasks.len(), source.location());

        Ok(Self {
            config,
            missing_config,
            tasks,
        })
    }

    /// Build a session from data already in memory
    pub fn from_parts(config: ViewerConfig, tasks: Vec<Task>) -> Self {
        Self {
            config,
            missing_config: None,
            tasks,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Path of the configuration file when it could not be found
    pub fn missing_config(&self) -> Option<&Path> {
        self.missing_config.as_deref()
    }

    /// Every loaded task, in document order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ViewerError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_directory_loads_empty_session() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::load(temp_dir.path()).unwrap();

        assert!(session.tasks().is_empty());
        assert!(session.config().is_empty());
        assert_eq!(
            session.missing_config(),
            Some(temp_dir.path().join("config.json").as_path())
        );
    }

    #[test]
    fn test_present_config_is_not_reported_missing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), "{}").unwrap();

        let session = Session::load(temp_dir.path()).unwrap();
        assert!(session.missing_config().is_none());
    }

    #[test]
    fn test_malformed_tasks_fail_the_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("generated_tasks_example.json"), "[oops").unwrap();

        let err = Session::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ViewerError::MalformedDocument { .. }));
    }

    struct StaticSource(Vec<Task>);

    impl TaskSource for StaticSource {
        fn location(&self) -> String {
            "memory".to_string()
        }

        fn load_tasks(&self) -> ViewerResult<Vec<Task>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_load_from_custom_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = StaticSource(vec![Task::new("T1", "One"), Task::new("T2", "Two")]);

        let session = Session::load_from(&ConfigDomain::new(temp_dir.path()), &source).unwrap();
        assert_eq!(session.tasks().len(), 2);
    }
}
