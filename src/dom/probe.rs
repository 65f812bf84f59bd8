use serde::{Deserialize, Serialize};

/// A typed inspection expression evaluated against a live element.
///
/// Each variant corresponds to one script a headless-browser binding runs in
/// the page context; the result comes back as loosely-typed JSON and is
/// deserialized by the rule module that issued the probe. Keeping the probe
/// set closed means rule modules never depend on a specific browser engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<'a> {
    /// Computed value of a single CSS property, e.g. "font-size" -> "12px".
    ComputedStyle(&'a str),
    /// Raw inline `style` attribute text, empty string when absent.
    StyleAttribute,
    /// Serialized outerHTML of the element.
    OuterHtml,
    /// Text content of the element including descendants.
    TextContent,
    /// Whether any descendant matches the CSS selector.
    HasDescendant(&'a str),
    /// Whether a positioned child with a non-transparent background exists
    /// (overlay detection for text rendered over images).
    HasPositionedOpaqueChild,
    /// Character count of the element referenced by aria-describedby,
    /// 0 when the attribute is absent or the target does not exist.
    AriaDescribedByTextLength,
    /// Tag/class/id/data-type of the next element sibling, null when none.
    NextSiblingSummary,
    /// Href values of anchors inside the closest container ancestor.
    AncestorContainerLinkHrefs,
    /// Position and offsets of each direct child, in DOM order.
    ChildLayout,
    /// Structural summary of a table element.
    TableShape,
    /// Orientation values of `@media (orientation: ...)` rules whose
    /// selectors match this element.
    OrientationMediaTargets,
    /// Whether `window.matchMedia(query)` currently matches.
    MatchedMediaQuery(&'a str),
}

/// Layout box of an element as reported by the render tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// Result payload for [`Probe::NextSiblingSummary`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiblingSummary {
    pub tag: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub data_type: String,
}

/// Result payload item for [`Probe::ChildLayout`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildBox {
    pub tag: String,
    pub top: f64,
    pub left: f64,
    /// Computed `position` value, e.g. "static", "absolute", "fixed".
    pub position: String,
}

/// Result payload for [`Probe::TableShape`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableShape {
    /// Cell count of each `<tr>`, in DOM order.
    #[serde(default)]
    pub row_cell_counts: Vec<usize>,
    #[serde(default)]
    pub th_count: usize,
    /// Cells carrying a `scope` attribute.
    #[serde(default)]
    pub scope_count: usize,
    #[serde(default)]
    pub thead_count: usize,
    #[serde(default)]
    pub aria_col_headers: usize,
    #[serde(default)]
    pub aria_row_headers: usize,
    #[serde(default)]
    pub has_caption: bool,
    #[serde(default)]
    pub has_summary_attr: bool,
    /// Count of `data-*` attributes on the table element itself.
    #[serde(default)]
    pub data_attr_count: usize,
    #[serde(default)]
    pub role: String,
    /// Fraction of `<td>` cells whose content is short and numeric-looking.
    #[serde(default)]
    pub numeric_cell_ratio: f64,
}

impl TableShape {
    /// Header semantics of any kind present on the table.
    pub fn has_header_semantics(&self) -> bool {
        self.th_count > 0
            || self.scope_count > 0
            || self.thead_count > 0
            || self.aria_col_headers > 0
            || self.aria_row_headers > 0
    }
}
