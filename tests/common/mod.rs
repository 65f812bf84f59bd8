//! In-memory DOM fixture implementing the alira capability traits.
//!
//! `FakeElement` answers probes from a small per-element model; `FakeBrowser`
//! hands out pages over a shared element list and counts `close()` calls so
//! tests can assert the page is released exactly once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use alira::dom::{
    BoundingBox, BrowserDriver, ChildBox, DomInspector, PageDriver, Probe, SiblingSummary,
    TableShape, WaitPolicy,
};
use alira::errors::AliraError;
use alira::Scanner;

#[derive(Clone, Default)]
pub struct FakeElement {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub styles: HashMap<String, String>,
    pub text: String,
    pub outer_html: Option<String>,
    pub bbox: Option<BoundingBox>,
    pub descendants: Vec<String>,
    pub positioned_opaque_child: bool,
    pub described_text_len: u64,
    pub sibling: Option<SiblingSummary>,
    pub ancestor_links: Vec<String>,
    pub child_layout: Vec<ChildBox>,
    pub table_shape: Option<TableShape>,
    pub orientation_targets: Vec<String>,
    pub matched_queries: Vec<String>,
    /// Every call on this element fails, as if the node detached mid-walk.
    pub fail_all: bool,
    /// Only outerHTML serialization fails.
    pub fail_outer_html: bool,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.styles.insert(property.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn outer_html(mut self, html: &str) -> Self {
        self.outer_html = Some(html.to_string());
        self
    }

    pub fn bbox(mut self, width: f64, height: f64) -> Self {
        self.bbox = Some(BoundingBox { width, height });
        self
    }

    pub fn with_descendant(mut self, selector: &str) -> Self {
        self.descendants.push(selector.to_string());
        self
    }

    pub fn table_shape(mut self, shape: TableShape) -> Self {
        self.table_shape = Some(shape);
        self
    }

    pub fn fail_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn fail_outer_html(mut self) -> Self {
        self.fail_outer_html = true;
        self
    }

    fn rendered(&self) -> String {
        if let Some(html) = &self.outer_html {
            return html.clone();
        }
        let mut attrs: Vec<(&String, &String)> = self.attrs.iter().collect();
        attrs.sort();
        let attr_text: String = attrs
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, v))
            .collect();
        if self.text.is_empty() {
            format!("<{}{}>", self.tag, attr_text)
        } else {
            format!("<{}{}>{}</{}>", self.tag, attr_text, self.text, self.tag)
        }
    }

    /// Computed-style lookup with browser-like defaults for a plainly
    /// styled page.
    fn computed(&self, property: &str) -> String {
        if let Some(value) = self.styles.get(property) {
            return value.clone();
        }
        match property {
            "color" => "rgb(0, 0, 0)",
            "background-color" => "rgba(0, 0, 0, 0)",
            "font-size" => "16px",
            "line-height" => "1.6",
            "display" => "block",
            "visibility" => "visible",
            "background-image" => "none",
            "max-width" => "none",
            "overflow" => "visible",
            "transform" => "none",
            _ => "",
        }
        .to_string()
    }

    fn detached(&self) -> AliraError {
        AliraError::Evaluation("element detached from document".into())
    }
}

#[async_trait]
impl DomInspector for FakeElement {
    async fn tag_name(&self) -> Result<String, AliraError> {
        if self.fail_all {
            return Err(self.detached());
        }
        Ok(self.tag.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, AliraError> {
        if self.fail_all {
            return Err(self.detached());
        }
        Ok(self.attrs.get(name).cloned())
    }

    async fn bounding_box(&self) -> Result<Option<BoundingBox>, AliraError> {
        if self.fail_all {
            return Err(self.detached());
        }
        Ok(self.bbox)
    }

    async fn evaluate(&self, probe: Probe<'_>) -> Result<Value, AliraError> {
        if self.fail_all {
            return Err(self.detached());
        }
        let value = match probe {
            Probe::ComputedStyle(property) => json!(self.computed(property)),
            Probe::StyleAttribute => json!(self.attrs.get("style").cloned().unwrap_or_default()),
            Probe::OuterHtml => {
                if self.fail_outer_html {
                    return Err(AliraError::Evaluation("outerHTML serialization failed".into()));
                }
                json!(self.rendered())
            }
            Probe::TextContent => json!(self.text),
            Probe::HasDescendant(selector) => {
                json!(self.descendants.iter().any(|s| s == selector))
            }
            Probe::HasPositionedOpaqueChild => json!(self.positioned_opaque_child),
            Probe::AriaDescribedByTextLength => json!(self.described_text_len),
            Probe::NextSiblingSummary => match &self.sibling {
                Some(sibling) => serde_json::to_value(sibling)?,
                None => Value::Null,
            },
            Probe::AncestorContainerLinkHrefs => json!(self.ancestor_links),
            Probe::ChildLayout => serde_json::to_value(&self.child_layout)?,
            Probe::TableShape => serde_json::to_value(
                self.table_shape.clone().unwrap_or_default(),
            )?,
            Probe::OrientationMediaTargets => json!(self.orientation_targets),
            Probe::MatchedMediaQuery(query) => {
                json!(self.matched_queries.iter().any(|q| q == query))
            }
        };
        Ok(value)
    }
}

pub struct FakePage {
    elements: Vec<FakeElement>,
    goto_error: Option<String>,
    close_count: Arc<AtomicUsize>,
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, _url: &str, _wait: WaitPolicy) -> Result<(), AliraError> {
        match &self.goto_error {
            Some(message) => Err(AliraError::Navigation(message.clone())),
            None => Ok(()),
        }
    }

    async fn query_all(
        &self,
        _selector: &str,
    ) -> Result<Vec<Box<dyn DomInspector>>, AliraError> {
        Ok(self
            .elements
            .iter()
            .cloned()
            .map(|e| Box::new(e) as Box<dyn DomInspector>)
            .collect())
    }

    async fn close(&self) -> Result<(), AliraError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeBrowser {
    elements: Vec<FakeElement>,
    goto_error: Option<String>,
    pub close_count: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn with_elements(elements: Vec<FakeElement>) -> Arc<Self> {
        Arc::new(Self {
            elements,
            goto_error: None,
            close_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn failing_navigation(message: &str) -> Arc<Self> {
        Arc::new(Self {
            elements: Vec::new(),
            goto_error: Some(message.to_string()),
            close_count: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn closes(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserDriver for FakeBrowser {
    async fn new_page(&self) -> Result<Box<dyn PageDriver>, AliraError> {
        Ok(Box::new(FakePage {
            elements: self.elements.clone(),
            goto_error: self.goto_error.clone(),
            close_count: self.close_count.clone(),
        }))
    }
}

pub fn scanner_for(elements: Vec<FakeElement>) -> (Scanner, Arc<FakeBrowser>) {
    let browser = FakeBrowser::with_elements(elements);
    (Scanner::new(browser.clone()), browser)
}

/// Route engine logs through the test harness when RUST_LOG is set.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
