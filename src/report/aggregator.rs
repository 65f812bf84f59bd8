//! Turns the flat findings list into the scored, grouped report.
//!
//! Grouping and ordering rely only on grouping keys, never on insertion
//! order, except for the first-finding `impact`/`suggestion` selections,
//! which follow the flat findings order produced by the sequential walk.

use chrono::Utc;
use uuid::Uuid;

use crate::config::ScannerConfig;
use crate::engine::metrics::ScanMetrics;
use crate::models::{
    AccessibilityIssue, AnalysisResult, IssueGroup, SectionCode, SectionReport,
};
use super::dedup::deduplicate_issues;
use super::sections::metadata_for;

/// Aggregate raw findings into the final report for one analyzed URL.
pub fn aggregate(
    url: &str,
    findings: Vec<AccessibilityIssue>,
    metrics: ScanMetrics,
    duration_ms: u64,
    config: &ScannerConfig,
) -> AnalysisResult {
    let issues = deduplicate_issues(findings);

    let raw_score: i64 = 100 + issues.iter().map(|i| i.score_impact as i64).sum::<i64>();
    let score = raw_score.clamp(0, 100) as u32;

    let mut sections = build_sections(&issues, config);
    sections.sort_by(|a, b| {
        b.score_impact
            .abs()
            .cmp(&a.score_impact.abs())
            .then(a.section.as_str().cmp(b.section.as_str()))
    });

    AnalysisResult {
        analysis_id: Uuid::new_v4(),
        url: url.to_string(),
        analyzed_at: Utc::now(),
        duration_ms,
        score,
        sections,
        detailed_issues: issues,
        metrics,
    }
}

fn build_sections(issues: &[AccessibilityIssue], config: &ScannerConfig) -> Vec<SectionReport> {
    // Group by section code, preserving first-encounter order within each
    // group so the section impact comes from the first finding.
    let mut grouped: Vec<(SectionCode, Vec<&AccessibilityIssue>)> = Vec::new();
    for issue in issues {
        match grouped.iter_mut().find(|(code, _)| *code == issue.section) {
            Some((_, members)) => members.push(issue),
            None => grouped.push((issue.section, vec![issue])),
        }
    }

    grouped
        .into_iter()
        .map(|(code, members)| {
            let (title, description) = metadata_for(code);
            let impact = members[0].impact;
            let score_impact: i32 = members.iter().map(|i| i.score_impact).sum();

            let mut issue_groups = build_issue_groups(&members, config);
            issue_groups.sort_by(|a, b| {
                b.count.cmp(&a.count).then(a.rule_type.cmp(&b.rule_type))
            });

            SectionReport {
                section: code,
                title: title.to_string(),
                description: description.to_string(),
                impact,
                total_issues: members.len(),
                score_impact,
                issue_groups,
            }
        })
        .collect()
}

fn build_issue_groups(
    members: &[&AccessibilityIssue],
    config: &ScannerConfig,
) -> Vec<IssueGroup> {
    let mut groups: Vec<IssueGroup> = Vec::new();
    for issue in members {
        match groups.iter_mut().find(|g| g.rule_type == issue.rule_type) {
            Some(group) => {
                group.count += 1;
                if group.examples.len() < config.max_examples_per_group {
                    group.examples.push(issue.element.clone());
                    group
                        .current_values
                        .push(issue.current_value.clone().unwrap_or_default());
                }
            }
            None => groups.push(IssueGroup {
                rule_type: issue.rule_type.clone(),
                count: 1,
                suggestion: issue.suggestion.clone(),
                examples: vec![issue.element.clone()],
                current_values: vec![issue.current_value.clone().unwrap_or_default()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;

    fn issue(
        section: SectionCode,
        rule_type: &str,
        element: &str,
        impact: Impact,
        score_impact: i32,
    ) -> AccessibilityIssue {
        AccessibilityIssue {
            section,
            rule_type: rule_type.to_string(),
            description: "test issue".to_string(),
            element: element.to_string(),
            impact,
            score_impact,
            suggestion: "a usefully descriptive remediation suggestion".to_string(),
            current_value: Some("12px".to_string()),
        }
    }

    fn aggregate_default(findings: Vec<AccessibilityIssue>) -> AnalysisResult {
        aggregate(
            "http://example.test",
            findings,
            ScanMetrics::default(),
            5,
            &ScannerConfig::default(),
        )
    }

    #[test]
    fn test_perfect_page_scores_100() {
        let result = aggregate_default(vec![]);
        assert_eq!(result.score, 100);
        assert!(result.sections.is_empty());
    }

    #[test]
    fn test_score_floor_is_zero() {
        let findings = (0..20)
            .map(|i| {
                issue(
                    SectionCode::Distinguishable,
                    "contrast",
                    &format!("<p>{}</p>", i),
                    Impact::High,
                    -10,
                )
            })
            .collect();
        let result = aggregate_default(findings);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_group_counts_consistent() {
        let findings = vec![
            issue(SectionCode::Distinguishable, "contrast", "<p>a</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>b</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "fontSize", "<p>c</p>", Impact::High, -10),
        ];
        let result = aggregate_default(findings);
        assert_eq!(result.sections.len(), 1);
        let section = &result.sections[0];
        assert_eq!(section.total_issues, 3);
        let group_sum: usize = section.issue_groups.iter().map(|g| g.count).sum();
        assert_eq!(section.total_issues, group_sum);
    }

    #[test]
    fn test_examples_capped_at_three() {
        let findings = (0..6)
            .map(|i| {
                issue(
                    SectionCode::Distinguishable,
                    "contrast",
                    &format!("<p>{}</p>", i),
                    Impact::High,
                    -10,
                )
            })
            .collect();
        let result = aggregate_default(findings);
        let group = &result.sections[0].issue_groups[0];
        assert_eq!(group.count, 6);
        assert_eq!(group.examples.len(), 3);
        assert_eq!(group.current_values.len(), 3);
    }

    #[test]
    fn test_groups_ordered_by_descending_count() {
        let findings = vec![
            issue(SectionCode::Distinguishable, "fontSize", "<p>a</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>b</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>c</p>", Impact::High, -10),
        ];
        let result = aggregate_default(findings);
        let groups = &result.sections[0].issue_groups;
        assert_eq!(groups[0].rule_type, "contrast");
        assert_eq!(groups[1].rule_type, "fontSize");
    }

    #[test]
    fn test_sections_ordered_by_absolute_penalty() {
        let findings = vec![
            issue(SectionCode::TextAlternatives, "altText", "<img>", Impact::Critical, -15),
            issue(SectionCode::Distinguishable, "lineHeight", "<p>a</p>", Impact::Medium, -8),
        ];
        let result = aggregate_default(findings);
        assert_eq!(result.sections[0].section, SectionCode::TextAlternatives);
        assert_eq!(result.sections[1].section, SectionCode::Distinguishable);
    }

    #[test]
    fn test_section_impact_is_first_finding() {
        // Preserved quirk: the section impact is the first finding's tier,
        // not the maximum across the section.
        let findings = vec![
            issue(SectionCode::Distinguishable, "lineHeight", "<p>a</p>", Impact::Medium, -8),
            issue(SectionCode::Distinguishable, "contrast", "<p>b</p>", Impact::High, -10),
        ];
        let result = aggregate_default(findings);
        assert_eq!(result.sections[0].impact, Impact::Medium);
    }

    #[test]
    fn test_deterministic_for_identical_findings() {
        let findings = || {
            vec![
                issue(SectionCode::Distinguishable, "contrast", "<p>a</p>", Impact::High, -10),
                issue(SectionCode::TextAlternatives, "altText", "<img>", Impact::Critical, -15),
            ]
        };
        let a = aggregate_default(findings());
        let b = aggregate_default(findings());
        assert_eq!(a.score, b.score);
        assert_eq!(a.sections.len(), b.sections.len());
        for (sa, sb) in a.sections.iter().zip(&b.sections) {
            assert_eq!(sa.section, sb.section);
            assert_eq!(sa.total_issues, sb.total_issues);
            assert_eq!(sa.score_impact, sb.score_impact);
        }
    }

    #[test]
    fn test_insertion_order_does_not_change_grouping() {
        let a = aggregate_default(vec![
            issue(SectionCode::Distinguishable, "contrast", "<p>a</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>b</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "fontSize", "<p>c</p>", Impact::High, -10),
        ]);
        let b = aggregate_default(vec![
            issue(SectionCode::Distinguishable, "fontSize", "<p>c</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>b</p>", Impact::High, -10),
            issue(SectionCode::Distinguishable, "contrast", "<p>a</p>", Impact::High, -10),
        ]);
        assert_eq!(a.score, b.score);
        let counts = |r: &AnalysisResult| {
            r.sections[0]
                .issue_groups
                .iter()
                .map(|g| (g.rule_type.clone(), g.count))
                .collect::<Vec<_>>()
        };
        assert_eq!(counts(&a), counts(&b));
    }
}
