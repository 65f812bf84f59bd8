//! Accessibility rule modules.
//!
//! Each module inspects a single DOM element through the [`DomInspector`]
//! capability and appends zero or more issues to the shared sink. Modules are
//! independent; the engine always runs them in the fixed registry order for
//! readable logs, not for correctness.

pub mod adaptable;
pub mod color;
pub mod distinguishable;
pub mod text_alternatives;
pub mod time_based_media;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ScannerConfig;
use crate::dom::{DomInspector, Probe};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, SectionCode};
use crate::utils::truncation::truncate_snippet;

/// Trait implemented by all rule modules.
#[async_trait]
pub trait RuleModule: Send + Sync {
    fn name(&self) -> &'static str;

    fn section(&self) -> SectionCode;

    /// Inspect one element and append any violations to the sink.
    async fn analyze(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError>;
}

/// The default registry in evaluation order: text alternatives,
/// time-based media, adaptable, distinguishable.
pub fn default_rules() -> Vec<Box<dyn RuleModule>> {
    vec![
        Box::new(text_alternatives::TextAlternativesRule),
        Box::new(time_based_media::TimeBasedMediaRule),
        Box::new(adaptable::AdaptableRule),
        Box::new(distinguishable::DistinguishableRule),
    ]
}

/// Evaluate a probe, absorbing adapter errors as "not detected".
pub(crate) async fn probe_value(
    element: &dyn DomInspector,
    probe: Probe<'_>,
) -> Option<serde_json::Value> {
    match element.evaluate(probe).await {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Probe failed, treating as not detected");
            None
        }
    }
}

/// Evaluate a probe expecting a string result; None on error or non-string.
pub(crate) async fn probe_string(element: &dyn DomInspector, probe: Probe<'_>) -> Option<String> {
    probe_value(element, probe)
        .await
        .and_then(|v| v.as_str().map(str::to_string))
}

/// Evaluate a probe expecting a boolean; adapter failures read as false.
pub(crate) async fn probe_bool(element: &dyn DomInspector, probe: Probe<'_>) -> bool {
    probe_value(element, probe)
        .await
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Evaluate a probe and deserialize its JSON payload; None on any failure.
pub(crate) async fn probe_json<T: DeserializeOwned>(
    element: &dyn DomInspector,
    probe: Probe<'_>,
) -> Option<T> {
    let value = probe_value(element, probe).await?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(error = %e, "Probe payload did not deserialize");
            None
        }
    }
}

/// Computed style value for a property, None when the lookup fails.
pub(crate) async fn computed_style(element: &dyn DomInspector, property: &str) -> Option<String> {
    probe_string(element, Probe::ComputedStyle(property)).await
}

/// Serialized, truncated outerHTML for reporting. Degrades to an empty
/// string on failure; the engine drops issues without element context.
pub(crate) async fn element_snippet(element: &dyn DomInspector, config: &ScannerConfig) -> String {
    match probe_string(element, Probe::OuterHtml).await {
        Some(html) => truncate_snippet(html.trim(), config.max_snippet_chars),
        None => String::new(),
    }
}
