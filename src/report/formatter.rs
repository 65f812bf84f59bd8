use crate::models::{AnalysisResult, SectionReport};
use crate::utils::formatting::format_duration;

pub fn format_report_markdown(result: &AnalysisResult) -> String {
    let mut report = String::new();
    report.push_str(&format!("# Accessibility Report for {}\n\n", result.url));
    report.push_str(&format!(
        "**Score:** {}/100 \u{2014} {} issues found in {}\n\n",
        result.score,
        result.total_issues(),
        format_duration(result.duration_ms),
    ));
    report.push_str(&format_executive_summary(result));
    for section in &result.sections {
        report.push_str("\n---\n\n");
        report.push_str(&format_section_markdown(section));
    }
    report
}

pub fn format_executive_summary(result: &AnalysisResult) -> String {
    let counts = result.impact_counts();
    let mut summary = String::from("## Summary\n\n| Impact | Count |\n|---|---|\n");
    for (impact, count) in counts {
        summary.push_str(&format!("| {:?} | {} |\n", impact, count));
    }
    summary.push_str(&format!("| **Total** | **{}** |\n", result.total_issues()));
    summary
}

pub fn format_section_markdown(section: &SectionReport) -> String {
    let mut out = format!(
        "## {} ({})\n\n{}\n\n**Impact:** {:?} \u{2014} {} issues, score impact {}\n\n",
        section.title,
        section.section,
        section.description,
        section.impact,
        section.total_issues,
        section.score_impact,
    );
    for group in &section.issue_groups {
        out.push_str(&format!(
            "### {} ({} occurrences)\n\n{}\n\n",
            group.rule_type, group.count, group.suggestion
        ));
        for (example, value) in group.examples.iter().zip(&group.current_values) {
            if value.is_empty() {
                out.push_str(&format!("- `{}`\n", example));
            } else {
                out.push_str(&format!("- `{}` \u{2014} {}\n", example, value));
            }
        }
        out.push('\n');
    }
    out
}
