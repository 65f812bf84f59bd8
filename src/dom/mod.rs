pub mod driver;
pub mod probe;

pub use driver::{BrowserDriver, DomInspector, PageDriver, WaitPolicy};
pub use probe::{BoundingBox, ChildBox, Probe, SiblingSummary, TableShape};
