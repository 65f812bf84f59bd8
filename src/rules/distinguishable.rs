//! Distinguishable content (EAA.1.4): sufficient contrast, readable font
//! sizes and line heights, text that survives resizing and is not painted
//! over imagery.

use async_trait::async_trait;

use crate::config::ScannerConfig;
use crate::dom::{DomInspector, Probe};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, Impact, SectionCode};

use super::color::{contrast_ratio, parse_color};
use super::{computed_style, element_snippet, probe_bool, probe_string, RuleModule};

/// Elements that never carry user-visible text.
const NON_CONTENT_TAGS: &[&str] = &[
    "style", "script", "noscript", "meta", "template", "defs", "link",
];

pub struct DistinguishableRule;

#[async_trait]
impl RuleModule for DistinguishableRule {
    fn name(&self) -> &'static str {
        "distinguishable"
    }

    fn section(&self) -> SectionCode {
        SectionCode::Distinguishable
    }

    async fn analyze(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let tag = element.tag_name().await?.to_lowercase();
        if NON_CONTENT_TAGS.contains(&tag.as_str()) {
            return Ok(());
        }

        let snippet = element_snippet(element, config).await;

        self.check_contrast(element, config, &snippet, sink).await;
        self.check_text_over_image(element, config, &snippet, sink)
            .await;
        self.check_text_resize(element, config, &snippet, sink).await;
        self.check_font_metrics(element, config, &snippet, sink).await;

        Ok(())
    }
}

impl DistinguishableRule {
    async fn check_contrast(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let fg = computed_style(element, "color").await;
        let bg = computed_style(element, "background-color").await;
        let (Some(fg), Some(bg)) = (
            fg.as_deref().and_then(parse_color),
            bg.as_deref().and_then(parse_color),
        ) else {
            return;
        };

        let ratio = contrast_ratio(fg, bg);
        if ratio >= config.min_contrast_ratio {
            return;
        }

        sink.push(AccessibilityIssue {
            section: SectionCode::Distinguishable,
            rule_type: "contrast".to_string(),
            description: format!(
                "Contrast ratio {:.1}:1 is below the {:.1}:1 minimum for normal text",
                ratio, config.min_contrast_ratio
            ),
            element: snippet.to_string(),
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Increase the difference between the text color and the background color until the contrast ratio reaches at least 4.5:1".to_string(),
            current_value: Some(format!("{:.1}:1", ratio)),
        });
    }

    /// Text over a background image is unreadable without an opaque overlay.
    async fn check_text_over_image(
        &self,
        element: &dyn DomInspector,
        _config: &ScannerConfig,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let background = computed_style(element, "background-image")
            .await
            .unwrap_or_default();
        if background.is_empty() || background == "none" || background.contains("gradient") {
            return;
        }

        if probe_bool(element, Probe::HasPositionedOpaqueChild).await {
            return;
        }

        sink.push(AccessibilityIssue {
            section: SectionCode::Distinguishable,
            rule_type: "textOverImage".to_string(),
            description: "Text is rendered directly over a background image without a contrast overlay".to_string(),
            element: snippet.to_string(),
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Place a solid or semi-opaque overlay between the image and the text, or move the text off the image".to_string(),
            current_value: Some(background),
        });
    }

    async fn check_text_resize(
        &self,
        element: &dyn DomInspector,
        _config: &ScannerConfig,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let inline = probe_string(element, Probe::StyleAttribute)
            .await
            .unwrap_or_default();
        let max_width = computed_style(element, "max-width").await.unwrap_or_default();
        let overflow = computed_style(element, "overflow").await.unwrap_or_default();

        let blocked = inline.contains("!important")
            || max_width.ends_with("px")
            || overflow == "hidden";
        if !blocked {
            return;
        }

        let offender = if inline.contains("!important") {
            "inline !important".to_string()
        } else if max_width.ends_with("px") {
            format!("max-width: {}", max_width)
        } else {
            "overflow: hidden".to_string()
        };

        sink.push(AccessibilityIssue {
            section: SectionCode::Distinguishable,
            rule_type: "textResize".to_string(),
            description: "Styling prevents text from being resized up to 200% without loss of content".to_string(),
            element: snippet.to_string(),
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Avoid !important on text styles, fixed pixel max-widths and overflow:hidden on text containers; use relative units instead".to_string(),
            current_value: Some(offender),
        });
    }

    async fn check_font_metrics(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let font_size = computed_style(element, "font-size").await.unwrap_or_default();
        let Some(font_px) = parse_px(&font_size) else {
            return;
        };

        if font_px < config.min_font_px {
            sink.push(AccessibilityIssue {
                section: SectionCode::Distinguishable,
                rule_type: "fontSize".to_string(),
                description: format!(
                    "Font size {} is below the {}px minimum for comfortable reading",
                    font_size, config.min_font_px
                ),
                element: snippet.to_string(),
                impact: Impact::High,
                score_impact: -10,
                suggestion: "Use a base font size of at least 16px for body text and size other text relative to it".to_string(),
                current_value: Some(font_size.clone()),
            });
        }

        let line_height = computed_style(element, "line-height")
            .await
            .unwrap_or_default();
        let ratio = line_height_ratio(&line_height, font_px);
        if ratio < config.min_line_height {
            sink.push(AccessibilityIssue {
                section: SectionCode::Distinguishable,
                rule_type: "lineHeight".to_string(),
                description: format!(
                    "Line height {:.2} is below the {} minimum for readable paragraphs",
                    ratio, config.min_line_height
                ),
                element: snippet.to_string(),
                impact: Impact::Medium,
                score_impact: -8,
                suggestion: "Set line-height to at least 1.5 on paragraph text so lines do not crowd each other".to_string(),
                current_value: Some(line_height),
            });
        }
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// Line height relative to font size. Browsers report "normal" (treated as
/// the 1.2 default), a pixel value, or a unitless multiplier.
fn line_height_ratio(value: &str, font_px: f64) -> f64 {
    let value = value.trim();
    if value.is_empty() || value == "normal" {
        return 1.2;
    }
    if let Some(px) = parse_px(value) {
        if font_px > 0.0 {
            return px / font_px;
        }
        return 1.2;
    }
    value.parse().unwrap_or(1.2)
}
