//! Task entity and related types.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Risk, Subtask};

/// Text rendered in place of an absent string field.
pub const PLACEHOLDER: &str = "N/A";

/// Group key used by aggregates for an absent priority or assignee.
pub const UNKNOWN_GROUP: &str = "unknown";

/// Priority levels that carry a dedicated icon.
///
/// Task records keep the priority as free text; this enum only exists for
/// presentation, so labels outside the four known values stay valid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    /// Resolve an exact (case-sensitive) priority label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }
}

/// Icon for a priority that is absent or not one of the known levels.
pub const NEUTRAL_PRIORITY_ICON: &str = "⚪";

/// A generated task record.
///
/// Every field is optional in the source document. Unknown fields are
/// ignored, and `null` reads the same as an absent field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text priority, usually one of low/medium/high/critical
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,

    /// Why the generator produced this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generated_reason: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub auto_split_subtasks: Vec<Subtask>,

    /// IDs of prerequisite tasks; not required to resolve
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub intelligent_dependencies: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub auto_detected_risks: Vec<Risk>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub quality_gates: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Borrow an optional string field, falling back to [`PLACEHOLDER`].
pub fn or_placeholder(field: Option<&String>) -> &str {
    field.map_or(PLACEHOLDER, String::as_str)
}

impl Task {
    /// Create a task with an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Estimated hours, zero when absent
    pub fn hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(0.0)
    }

    /// Complexity score, zero when absent
    pub fn complexity(&self) -> f64 {
        self.complexity_score.unwrap_or(0.0)
    }

    pub fn display_id(&self) -> &str {
        or_placeholder(self.id.as_ref())
    }

    pub fn display_name(&self) -> &str {
        or_placeholder(self.name.as_ref())
    }

    /// Exact, case-sensitive priority comparison. A task without a priority
    /// never matches.
    pub fn has_priority(&self, priority: &str) -> bool {
        self.priority.as_deref() == Some(priority)
    }

    pub fn priority_level(&self) -> Option<PriorityLevel> {
        self.priority.as_deref().and_then(PriorityLevel::from_label)
    }

    pub fn priority_icon(&self) -> &'static str {
        self.priority_level()
            .map_or(NEUTRAL_PRIORITY_ICON, PriorityLevel::icon)
    }

    /// Priority key used by aggregates
    pub fn priority_group(&self) -> &str {
        self.priority.as_deref().unwrap_or(UNKNOWN_GROUP)
    }

    /// Assignee key used by aggregates
    pub fn assignee_group(&self) -> &str {
        self.assignee.as_deref().unwrap_or(UNKNOWN_GROUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("T1", "Parse AST");
        assert_eq!(task.id.as_deref(), Some("T1"));
        assert_eq!(task.display_name(), "Parse AST");
        assert!(task.auto_split_subtasks.is_empty());
        assert_eq!(task.hours(), 0.0);
    }

    #[test]
    fn test_absent_fields_use_placeholders() {
        let task: Task = serde_json::from_str("{}").unwrap();
        assert_eq!(task.display_id(), "N/A");
        assert_eq!(task.display_name(), "N/A");
        assert_eq!(task.complexity(), 0.0);
        assert_eq!(task.priority_group(), "unknown");
        assert_eq!(task.assignee_group(), "unknown");
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let task: Task = serde_json::from_str(
            r#"{"id": "T1", "auto_split_subtasks": null, "quality_gates": null, "estimated_hours": null}"#,
        )
        .unwrap();
        assert!(task.auto_split_subtasks.is_empty());
        assert!(task.quality_gates.is_empty());
        assert_eq!(task.hours(), 0.0);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let task: Task =
            serde_json::from_str(r#"{"id": "T1", "status": "done", "owner_team": 4}"#).unwrap();
        assert_eq!(task.display_id(), "T1");
    }

    #[test]
    fn test_priority_match_is_case_sensitive() {
        let mut task = Task::new("T1", "Task");
        task.priority = Some("High".to_string());
        assert!(task.has_priority("High"));
        assert!(!task.has_priority("high"));
        assert_eq!(task.priority_level(), None);
        assert_eq!(task.priority_icon(), NEUTRAL_PRIORITY_ICON);
    }

    #[test]
    fn test_priority_icons() {
        assert_eq!(PriorityLevel::Critical.icon(), "🔴");
        assert_eq!(PriorityLevel::High.icon(), "🟠");
        assert_eq!(PriorityLevel::Medium.icon(), "🟡");
        assert_eq!(PriorityLevel::Low.icon(), "🟢");
        assert_eq!(PriorityLevel::from_label("urgent"), None);
    }
}
