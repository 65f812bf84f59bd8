use async_trait::async_trait;

use crate::errors::AliraError;
use super::probe::{BoundingBox, Probe};

/// Wait policy applied when navigating to the target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitPolicy {
    /// Wait until the network has been idle; the default, so rules see the
    /// post-script-execution DOM.
    #[default]
    NetworkIdle,
    DomContentLoaded,
    Load,
}

/// Inspection capability over a single live element.
///
/// Implemented once per target platform by a headless-browser binding; rule
/// modules depend only on this trait. Errors raised here (cross-origin
/// stylesheets, detached elements) are recoverable and absorbed by callers.
#[async_trait]
pub trait DomInspector: Send + Sync {
    async fn tag_name(&self) -> Result<String, AliraError>;

    async fn attribute(&self, name: &str) -> Result<Option<String>, AliraError>;

    /// None when the element has no render box.
    async fn bounding_box(&self) -> Result<Option<BoundingBox>, AliraError>;

    /// Evaluate a typed inspection expression against the element.
    async fn evaluate(&self, probe: Probe<'_>) -> Result<serde_json::Value, AliraError>;
}

/// A loaded page owned by the page-automation collaborator.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str, wait: WaitPolicy) -> Result<(), AliraError>;

    /// Every element matching the selector in the final rendered document.
    async fn query_all(&self, selector: &str)
        -> Result<Vec<Box<dyn DomInspector>>, AliraError>;

    async fn close(&self) -> Result<(), AliraError>;
}

/// Factory for pages; the browser lifecycle itself belongs to the collaborator.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn new_page(&self) -> Result<Box<dyn PageDriver>, AliraError>;
}
