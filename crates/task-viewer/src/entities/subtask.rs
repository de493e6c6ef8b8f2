//! Subtask entity.

use serde::{Deserialize, Serialize};

use super::task::or_placeholder;

/// A lightweight unit split out of a task by the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Hour estimate for this slice of the parent task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
}

impl Subtask {
    /// Create a new subtask
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: Some(name.into()),
            hours: Some(hours),
        }
    }

    pub fn display_name(&self) -> &str {
        or_placeholder(self.name.as_ref())
    }

    /// Hours, zero when absent
    pub fn hours(&self) -> f64 {
        self.hours.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtask_new() {
        let subtask = Subtask::new("Write lexer", 6.0);
        assert_eq!(subtask.display_name(), "Write lexer");
        assert_eq!(subtask.hours(), 6.0);
    }

    #[test]
    fn test_subtask_defaults() {
        let subtask: Subtask = serde_json::from_str(r#"{"hours": null}"#).unwrap();
        assert_eq!(subtask.display_name(), "N/A");
        assert_eq!(subtask.hours(), 0.0);
    }
}
