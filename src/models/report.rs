use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::metrics::ScanMetrics;
use super::issue::{AccessibilityIssue, Impact, SectionCode};

/// Issues sharing the same rule type within one section.
///
/// `count` always equals the number of member issues; `examples` and
/// `current_values` are parallel lists capped at the configured maximum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueGroup {
    pub rule_type: String,
    pub count: usize,
    /// Remediation text taken from the first issue in the group.
    pub suggestion: String,
    /// Up to N element snippets illustrating the violation.
    pub examples: Vec<String>,
    /// Observed values for the same examples, empty string where absent.
    pub current_values: Vec<String>,
}

/// Aggregation of all issues sharing one section code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: SectionCode,
    pub title: String,
    pub description: String,
    /// Severity taken from the first issue encountered in this section.
    pub impact: Impact,
    pub total_issues: usize,
    /// Sum of the member issues' penalties.
    pub score_impact: i32,
    /// Ordered by descending count.
    pub issue_groups: Vec<IssueGroup>,
}

/// Top-level report for one page analysis.
///
/// Constructed once per `analyze_url` call, never cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Overall accessibility score, 0-100.
    pub score: u32,
    /// Ordered by descending absolute score impact.
    pub sections: Vec<SectionReport>,
    /// Flat deduplicated list of every issue found.
    pub detailed_issues: Vec<AccessibilityIssue>,
    pub metrics: ScanMetrics,
}

impl AnalysisResult {
    /// Returns the count of issues at each severity tier, most severe first.
    pub fn impact_counts(&self) -> [(Impact, usize); 4] {
        let count = |impact: Impact| {
            self.detailed_issues
                .iter()
                .filter(|i| i.impact == impact)
                .count()
        };
        [
            (Impact::Critical, count(Impact::Critical)),
            (Impact::High, count(Impact::High)),
            (Impact::Medium, count(Impact::Medium)),
            (Impact::Low, count(Impact::Low)),
        ]
    }

    pub fn total_issues(&self) -> usize {
        self.detailed_issues.len()
    }
}
