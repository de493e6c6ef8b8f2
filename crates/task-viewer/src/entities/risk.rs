//! Risk entity.

use serde::{Deserialize, Serialize};

use super::task::or_placeholder;

/// A concern the generator attached to a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Risk {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub risk_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Estimated likelihood, nominally in [0, 1] but not validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl Risk {
    pub fn new(
        risk_type: impl Into<String>,
        description: impl Into<String>,
        probability: f64,
    ) -> Self {
        Self {
            risk_type: Some(risk_type.into()),
            description: Some(description.into()),
            probability: Some(probability),
        }
    }

    pub fn display_type(&self) -> &str {
        or_placeholder(self.risk_type.as_ref())
    }

    pub fn display_description(&self) -> &str {
        or_placeholder(self.description.as_ref())
    }

    /// Probability, zero when absent
    pub fn probability(&self) -> f64 {
        self.probability.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_reads_type_key() {
        let risk: Risk = serde_json::from_str(
            r#"{"type": "technical", "description": "Parser edge cases", "probability": 0.35}"#,
        )
        .unwrap();
        assert_eq!(risk.display_type(), "technical");
        assert_eq!(risk.display_description(), "Parser edge cases");
        assert!((risk.probability() - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_risk_out_of_range_probability_is_kept() {
        let risk = Risk::new("schedule", "Slip", 1.5);
        assert_eq!(risk.probability(), 1.5);
    }
}
