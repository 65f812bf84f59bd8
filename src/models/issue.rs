use serde::{Deserialize, Serialize};

/// Severity tier for an accessibility issue, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
}

impl Impact {
    /// Returns a numeric rank where lower values indicate higher severity.
    /// Critical = 0, High = 1, Medium = 2, Low = 3.
    pub fn rank(&self) -> u8 {
        match self {
            Impact::Critical => 0,
            Impact::High => 1,
            Impact::Medium => 2,
            Impact::Low => 3,
        }
    }
}

/// Accessibility category a rule belongs to, keyed by its EAA section code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionCode {
    #[serde(rename = "EAA.1.1")]
    TextAlternatives,
    #[serde(rename = "EAA.1.2")]
    TimeBasedMedia,
    #[serde(rename = "EAA.1.3")]
    Adaptable,
    #[serde(rename = "EAA.1.4")]
    Distinguishable,
}

impl SectionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextAlternatives => "EAA.1.1",
            Self::TimeBasedMedia => "EAA.1.2",
            Self::Adaptable => "EAA.1.3",
            Self::Distinguishable => "EAA.1.4",
        }
    }
}

impl std::fmt::Display for SectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single accessibility violation detected on one element during a page
/// analysis.
///
/// Issues are created by rule modules, consumed once by the aggregator and
/// never persisted. `element` and `suggestion` are non-empty in every
/// aggregated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityIssue {
    /// Category code, e.g. "EAA.1.4".
    pub section: SectionCode,
    /// Short machine-readable tag, e.g. "altText", "contrast", "fontSize".
    pub rule_type: String,
    /// Human-readable explanation of the violation.
    pub description: String,
    /// Serialized HTML snippet identifying the offending node.
    pub element: String,
    pub impact: Impact,
    /// Negative penalty applied to the overall score.
    pub score_impact: i32,
    /// Actionable remediation text.
    pub suggestion: String,
    /// The offending observed value, e.g. "12px" or "2.1:1".
    pub current_value: Option<String>,
}
