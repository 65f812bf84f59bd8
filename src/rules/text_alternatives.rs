//! Text alternatives (EAA.1.1): images and CSS background images must carry
//! a usable text alternative, decorative imagery must be hidden from
//! assistive technology.

use async_trait::async_trait;
use regex::Regex;

use crate::config::ScannerConfig;
use crate::dom::{DomInspector, Probe};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, Impact, SectionCode};

use super::{computed_style, element_snippet, probe_string, RuleModule};

const DECORATIVE_FILENAME: &str = r"(?i)decoration|background|bg-|pattern|divider";
const COMPLEX_FILENAME: &str = r"(?i)chart|graph|diagram|map|infographic";
const COMPLEX_KEYWORD: &str = r"(?i)chart|graph|diagram";

pub struct TextAlternativesRule;

#[async_trait]
impl RuleModule for TextAlternativesRule {
    fn name(&self) -> &'static str {
        "text-alternatives"
    }

    fn section(&self) -> SectionCode {
        SectionCode::TextAlternatives
    }

    async fn analyze(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let tag = element.tag_name().await?.to_lowercase();

        if tag == "img" {
            self.check_img(element, config, sink).await?;
        }
        self.check_background_image(element, config, sink).await;

        Ok(())
    }
}

impl TextAlternativesRule {
    async fn check_img(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let alt = element.attribute("alt").await?;
        let src = element.attribute("src").await?.unwrap_or_default();
        let class = element.attribute("class").await?.unwrap_or_default();
        let id = element.attribute("id").await?.unwrap_or_default();
        let role = element
            .attribute("role")
            .await?
            .unwrap_or_default()
            .to_lowercase();
        let aria_hidden = element
            .attribute("aria-hidden")
            .await?
            .map_or(false, |v| v == "true");

        let filename = src.rsplit('/').next().unwrap_or(&src).to_string();

        // Hidden from assistive technology: exempt from the missing-alt path.
        let presentational = role == "presentation" || role == "none" || aria_hidden;
        let display = computed_style(element, "display").await.unwrap_or_default();
        let visibility = computed_style(element, "visibility")
            .await
            .unwrap_or_default();
        let hidden = display == "none" || visibility == "hidden";

        let decorative_re = Regex::new(DECORATIVE_FILENAME).expect("valid regex");
        let is_decorative = presentational
            || class.to_lowercase().contains("decorative")
            || decorative_re.is_match(&filename);

        let is_complex = self
            .classify_complex(element, config, &filename, &class, &id)
            .await;

        let alt_present_nonempty = alt.as_deref().map_or(false, |a| !a.is_empty());
        let alt_missing_or_blank = alt.as_deref().map_or(true, |a| a.trim().is_empty());
        // A single word is not a real description of a complex image.
        let alt_not_sentence = alt
            .as_deref()
            .map_or(true, |a| a.trim().is_empty() || !a.trim().contains(' '));

        let snippet = element_snippet(element, config).await;

        if is_decorative && alt_present_nonempty {
            sink.push(AccessibilityIssue {
                section: SectionCode::TextAlternatives,
                rule_type: "altText".to_string(),
                description: "Decorative image carries alt text that will be announced by screen readers".to_string(),
                element: snippet,
                impact: Impact::Medium,
                score_impact: -8,
                suggestion: "Decorative images should have an empty alt attribute (alt=\"\") so assistive technology skips them".to_string(),
                current_value: alt.clone(),
            });
        } else if is_complex && alt_not_sentence {
            sink.push(AccessibilityIssue {
                section: SectionCode::TextAlternatives,
                rule_type: "complexImage".to_string(),
                description: "Complex image (chart, graph or diagram) lacks a descriptive text alternative".to_string(),
                element: snippet,
                impact: Impact::Critical,
                score_impact: -15,
                suggestion: "Describe the information the image conveys in the alt text, and provide a longer description nearby or via aria-describedby".to_string(),
                current_value: alt.clone(),
            });
        } else if alt_missing_or_blank && !presentational && !hidden {
            sink.push(AccessibilityIssue {
                section: SectionCode::TextAlternatives,
                rule_type: "altText".to_string(),
                description: "Image has no alt attribute, so screen readers cannot describe it".to_string(),
                element: snippet,
                impact: Impact::Critical,
                score_impact: -15,
                suggestion: "Add an alt attribute describing the image content, or alt=\"\" if the image is purely decorative".to_string(),
                current_value: None,
            });
        }

        Ok(())
    }

    async fn classify_complex(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        filename: &str,
        class: &str,
        id: &str,
    ) -> bool {
        let complex_file_re = Regex::new(COMPLEX_FILENAME).expect("valid regex");
        if complex_file_re.is_match(filename) {
            return true;
        }

        if let Ok(Some(bbox)) = element.bounding_box().await {
            if bbox.width > config.complex_image_min_px && bbox.height > config.complex_image_min_px
            {
                return true;
            }
        }

        let keyword_re = Regex::new(COMPLEX_KEYWORD).expect("valid regex");
        keyword_re.is_match(class) || keyword_re.is_match(id)
    }

    /// Elements painted with a CSS background image need some other text
    /// alternative; gradients are exempt.
    async fn check_background_image(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let background = computed_style(element, "background-image")
            .await
            .unwrap_or_default();
        if background.is_empty() || background == "none" || background.contains("gradient") {
            return;
        }

        let has_label = for_any_attribute(
            element,
            &["aria-label", "aria-labelledby", "aria-describedby", "title"],
        )
        .await;
        let text = probe_string(element, Probe::TextContent)
            .await
            .unwrap_or_default();

        if has_label || !text.trim().is_empty() {
            return;
        }

        let snippet = element_snippet(element, config).await;
        sink.push(AccessibilityIssue {
            section: SectionCode::TextAlternatives,
            rule_type: "backgroundImage".to_string(),
            description: "Element conveys content through a CSS background image with no text alternative".to_string(),
            element: snippet,
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Add an aria-label or visible text for the information in the background image, or move it to an <img> with alt text".to_string(),
            current_value: Some(background),
        });
    }
}

/// True if any of the named attributes is present with a non-empty value.
async fn for_any_attribute(element: &dyn DomInspector, names: &[&str]) -> bool {
    for name in names {
        if let Ok(Some(value)) = element.attribute(name).await {
            if !value.trim().is_empty() {
                return true;
            }
        }
    }
    false
}
