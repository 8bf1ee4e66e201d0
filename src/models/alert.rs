//! Hazard alert model

use serde::{Deserialize, Serialize};

/// Alert severity, ordered low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Advisory,
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Advisory => write!(f, "advisory"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl Severity {
    /// Banner label matching the dashboard's alert cards
    #[must_use]
    pub fn banner_label(self) -> &'static str {
        match self {
            Severity::Advisory => "ADVISORY",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL ALERT",
        }
    }
}

/// A structured warning derived from condition codes and environmental
/// thresholds.
///
/// The `id` is stable across classifications of the same rule so the
/// presentation layer can track dismissal across re-renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardAlert {
    /// Stable short identifier used for de-duplication and dismissal
    pub id: String,
    /// Short human title
    pub event: String,
    /// Originator label
    pub sender_name: String,
    /// Free-text description
    pub description: String,
    /// Severity of the hazard
    pub severity: Severity,
    /// Optional validity window start (seconds since epoch)
    pub start: Option<i64>,
    /// Optional validity window end (seconds since epoch)
    pub end: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Advisory < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn test_banner_labels() {
        assert_eq!(Severity::Critical.banner_label(), "CRITICAL ALERT");
        assert_eq!(Severity::Advisory.banner_label(), "ADVISORY");
    }
}
