use serde::{Deserialize, Serialize};

/// Tunable thresholds for the rule modules and the aggregator.
///
/// Defaults match the WCAG-derived constants the rules were written against;
/// every field can be overridden individually from a YAML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerConfig {
    /// Minimum contrast ratio for normal text (WCAG AA).
    #[serde(default = "default_min_contrast_ratio")]
    pub min_contrast_ratio: f64,

    /// Smallest acceptable computed font size in pixels.
    #[serde(default = "default_min_font_px")]
    pub min_font_px: f64,

    /// Smallest acceptable line-height relative to font size.
    #[serde(default = "default_min_line_height")]
    pub min_line_height: f64,

    /// Maximum element snippets retained per issue group.
    #[serde(default = "default_max_examples_per_group")]
    pub max_examples_per_group: usize,

    /// Minimum character count for an aria-describedby target to count as a
    /// transcript.
    #[serde(default = "default_transcript_min_chars")]
    pub transcript_min_chars: u64,

    /// Both bounding-box dimensions must exceed this for an image to be
    /// classified complex by size.
    #[serde(default = "default_complex_image_min_px")]
    pub complex_image_min_px: f64,

    /// Children whose tops differ by at most this many pixels are treated as
    /// the same visual row.
    #[serde(default = "default_row_proximity_px")]
    pub row_proximity_px: f64,

    /// Element snippets longer than this are truncated before reporting.
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,
}

fn default_min_contrast_ratio() -> f64 {
    4.5
}
fn default_min_font_px() -> f64 {
    16.0
}
fn default_min_line_height() -> f64 {
    1.5
}
fn default_max_examples_per_group() -> usize {
    3
}
fn default_transcript_min_chars() -> u64 {
    50
}
fn default_complex_image_min_px() -> f64 {
    300.0
}
fn default_row_proximity_px() -> f64 {
    10.0
}
fn default_max_snippet_chars() -> usize {
    300
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_contrast_ratio: default_min_contrast_ratio(),
            min_font_px: default_min_font_px(),
            min_line_height: default_min_line_height(),
            max_examples_per_group: default_max_examples_per_group(),
            transcript_min_chars: default_transcript_min_chars(),
            complex_image_min_px: default_complex_image_min_px(),
            row_proximity_px: default_row_proximity_px(),
            max_snippet_chars: default_max_snippet_chars(),
        }
    }
}
