//! Adaptable content (EAA.1.3): data tables need header semantics, visual
//! order must follow DOM order, content must not be locked to one
//! orientation, and structure should use semantic landmarks.

use std::cmp::Ordering;

use async_trait::async_trait;
use regex::Regex;

use crate::config::ScannerConfig;
use crate::dom::{ChildBox, DomInspector, Probe, TableShape};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, Impact, SectionCode};

use super::{computed_style, element_snippet, probe_bool, probe_json, probe_string, RuleModule};

const SEMANTIC_TAGS: &[&str] = &[
    "article", "aside", "footer", "header", "nav", "main", "section",
];
const LANDMARK_ROLES: &[&str] = &[
    "banner",
    "main",
    "contentinfo",
    "complementary",
    "navigation",
];

pub struct AdaptableRule;

#[async_trait]
impl RuleModule for AdaptableRule {
    fn name(&self) -> &'static str {
        "adaptable"
    }

    fn section(&self) -> SectionCode {
        SectionCode::Adaptable
    }

    async fn analyze(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let tag = element.tag_name().await?.to_lowercase();
        let role = element
            .attribute("role")
            .await?
            .unwrap_or_default()
            .to_lowercase();

        if tag == "table" {
            self.check_table_structure(element, config, sink).await;
        }

        self.check_meaningful_sequence(element, config, sink).await;
        self.check_orientation_lock(element, config, sink).await;
        self.check_semantic_structure(element, config, &tag, &role, sink)
            .await;

        Ok(())
    }
}

impl AdaptableRule {
    async fn check_table_structure(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let Some(shape) = probe_json::<TableShape>(element, Probe::TableShape).await else {
            return;
        };

        if !is_data_table(&shape) || shape.has_header_semantics() {
            return;
        }

        let snippet = element_snippet(element, config).await;
        sink.push(AccessibilityIssue {
            section: SectionCode::Adaptable,
            rule_type: "tableStructure".to_string(),
            description: "Data table has no header cells, so screen readers cannot relate cells to their headers".to_string(),
            element: snippet,
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Mark header cells with <th> (or scope attributes) inside a <thead>, or use aria-colheader/aria-rowheader roles".to_string(),
            current_value: Some(format!(
                "th: {}, scope: {}, thead: {}, aria headers: {}",
                shape.th_count,
                shape.scope_count,
                shape.thead_count,
                shape.aria_col_headers + shape.aria_row_headers
            )),
        });
    }

    /// Absolutely positioned children can paint in an order that differs from
    /// the DOM; screen readers follow the DOM.
    async fn check_meaningful_sequence(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let children: Vec<ChildBox> = probe_json(element, Probe::ChildLayout)
            .await
            .unwrap_or_default();
        if children.len() < 2 {
            return;
        }
        let any_positioned = children
            .iter()
            .any(|c| c.position == "absolute" || c.position == "fixed");
        if !any_positioned {
            return;
        }

        let order = visual_order(&children, config.row_proximity_px);
        let mismatch = order.iter().enumerate().any(|(visual, &dom)| visual != dom);
        if !mismatch {
            return;
        }

        let snippet = element_snippet(element, config).await;
        sink.push(AccessibilityIssue {
            section: SectionCode::Adaptable,
            rule_type: "meaningfulSequence".to_string(),
            description: "Visual order of positioned children differs from DOM order, so reading order will not match what sighted users see".to_string(),
            element: snippet,
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Reorder the markup to match the visual presentation instead of repositioning elements with absolute or fixed positioning".to_string(),
            current_value: None,
        });
    }

    async fn check_orientation_lock(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let targets: Vec<String> = probe_json(element, Probe::OrientationMediaTargets)
            .await
            .unwrap_or_default();

        let rotate_re = Regex::new(r"rotate\(").expect("valid regex");
        let transform = computed_style(element, "transform").await.unwrap_or_default();
        let inline = probe_string(element, Probe::StyleAttribute)
            .await
            .unwrap_or_default();
        let rotated = rotate_re.is_match(&transform) || rotate_re.is_match(&inline);

        let display = computed_style(element, "display").await.unwrap_or_default();
        let hidden_in_portrait = display == "none"
            && probe_bool(element, Probe::MatchedMediaQuery("(orientation: portrait)")).await;

        let signal = if !targets.is_empty() {
            Some(format!("@media (orientation: {})", targets.join(", ")))
        } else if rotated {
            Some("transform: rotate(...)".to_string())
        } else if hidden_in_portrait {
            Some("display:none under portrait orientation".to_string())
        } else {
            None
        };

        let Some(signal) = signal else { return };

        let snippet = element_snippet(element, config).await;
        sink.push(AccessibilityIssue {
            section: SectionCode::Adaptable,
            rule_type: "orientation".to_string(),
            description: "Content is restricted to a single display orientation".to_string(),
            element: snippet,
            impact: Impact::Medium,
            score_impact: -8,
            suggestion: "Support both portrait and landscape orientations; remove orientation-specific hiding or rotation unless a specific orientation is essential".to_string(),
            current_value: Some(signal),
        });
    }

    async fn check_semantic_structure(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        tag: &str,
        role: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        if SEMANTIC_TAGS.contains(&tag) || LANDMARK_ROLES.contains(&role) {
            return;
        }

        let snippet = element_snippet(element, config).await;
        sink.push(AccessibilityIssue {
            section: SectionCode::Adaptable,
            rule_type: "semanticStructure".to_string(),
            description: format!("<{}> does not convey its role in the page structure to assistive technology", tag),
            element: snippet,
            impact: Impact::Medium,
            score_impact: -8,
            suggestion: "Use semantic HTML elements (header, nav, main, section, article, aside, footer) or landmark roles for page structure".to_string(),
            current_value: None,
        });
    }
}

/// Heuristic classification of data tables versus layout tables.
fn is_data_table(shape: &TableShape) -> bool {
    if shape.data_attr_count > 0 || shape.has_caption || shape.has_summary_attr {
        return true;
    }
    if shape.numeric_cell_ratio > 0.5 {
        return true;
    }
    let rows = &shape.row_cell_counts;
    if rows.len() >= 2 {
        let first = rows[0];
        let uniform = rows.iter().all(|&c| c == first);
        if uniform && (first > 1 || rows.len() > 2) {
            return true;
        }
    }
    let role = shape.role.to_lowercase();
    if role == "grid" || role == "treegrid" {
        return true;
    }
    shape.aria_col_headers > 0 || shape.aria_row_headers > 0
}

/// Indices of `children` in visual order: sorted by top, with tops within
/// `proximity` pixels treated as the same row, then by left within a row.
fn visual_order(children: &[ChildBox], proximity: f64) -> Vec<usize> {
    let mut by_top: Vec<usize> = (0..children.len()).collect();
    by_top.sort_by(|&a, &b| {
        children[a]
            .top
            .partial_cmp(&children[b].top)
            .unwrap_or(Ordering::Equal)
    });

    let mut row_of = vec![0usize; children.len()];
    let mut current_row = 0usize;
    let mut row_start_top = 0.0f64;
    for (i, &idx) in by_top.iter().enumerate() {
        if i == 0 {
            row_start_top = children[idx].top;
        } else if (children[idx].top - row_start_top).abs() > proximity {
            current_row += 1;
            row_start_top = children[idx].top;
        }
        row_of[idx] = current_row;
    }

    let mut order: Vec<usize> = (0..children.len()).collect();
    order.sort_by(|&a, &b| {
        row_of[a].cmp(&row_of[b]).then(
            children[a]
                .left
                .partial_cmp(&children[b].left)
                .unwrap_or(Ordering::Equal),
        )
    });
    order
}
