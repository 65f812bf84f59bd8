use std::collections::HashSet;

use crate::models::AccessibilityIssue;

/// Collapse issues reporting the same rule on the same element snippet.
/// The first occurrence wins; order is otherwise preserved so downstream
/// first-finding selections stay stable.
pub fn deduplicate_issues(issues: Vec<AccessibilityIssue>) -> Vec<AccessibilityIssue> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let mut unique = Vec::with_capacity(issues.len());
    for issue in issues {
        let key = (
            issue.section.as_str().to_string(),
            issue.rule_type.clone(),
            issue.element.clone(),
        );
        if seen.insert(key) {
            unique.push(issue);
        }
    }
    unique
}
