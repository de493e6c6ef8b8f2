//! Configuration entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Working hours in a day when the configuration does not say otherwise
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Contents of `config.json`.
///
/// The document is an arbitrary JSON object written by the task generator.
/// It is kept verbatim; the accessors below read the few keys the viewer
/// understands and treat anything missing or of the wrong type as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewerConfig {
    entries: Map<String, Value>,
}

impl ViewerConfig {
    pub fn new(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw top-level entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// `global.projectName`
    pub fn project_name(&self) -> Option<&str> {
        self.get("global")
            .and_then(|global| global.get("projectName"))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// `viewer.hoursPerDay`, used to express durations in working days
    pub fn hours_per_day(&self) -> f64 {
        self.get("viewer")
            .and_then(|viewer| viewer.get("hoursPerDay"))
            .and_then(Value::as_f64)
            .filter(|hours| *hours > 0.0)
            .unwrap_or(DEFAULT_HOURS_PER_DAY)
    }
}
