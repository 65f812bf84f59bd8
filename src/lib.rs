//! Accessibility rule-evaluation engine.
//!
//! `alira` walks every element of a rendered web page through a set of
//! accessibility rule modules (text alternatives, time-based media,
//! adaptable content, distinguishable content), collects violations, and
//! aggregates them into a scored [`models::AnalysisResult`].
//!
//! Page rendering is an external collaborator: callers provide an
//! implementation of the [`dom::BrowserDriver`] / [`dom::DomInspector`]
//! capability traits (typically a headless-browser binding), and the engine
//! consumes it through typed [`dom::Probe`] expressions only.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn run(browser: Arc<dyn alira::dom::BrowserDriver>) -> Result<(), alira::AliraError> {
//! let scanner = alira::Scanner::new(browser);
//! let report = scanner.analyze_url("https://example.org").await?;
//! println!("score: {}", report.score);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dom;
pub mod engine;
pub mod errors;
pub mod models;
pub mod report;
pub mod rules;
pub mod utils;

pub use config::ScannerConfig;
pub use engine::Scanner;
pub use errors::AliraError;
pub use models::{AccessibilityIssue, AnalysisResult, Impact, SectionCode};
