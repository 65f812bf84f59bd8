use crate::models::SectionCode;

pub struct SectionMetadata {
    pub code: SectionCode,
    pub title: &'static str,
    pub description: &'static str,
}

/// Static per-category metadata, loaded once and never mutated.
pub static SECTIONS: &[SectionMetadata] = &[
    SectionMetadata {
        code: SectionCode::TextAlternatives,
        title: "Text Alternatives",
        description: "Non-text content needs a text alternative that serves the equivalent purpose",
    },
    SectionMetadata {
        code: SectionCode::TimeBasedMedia,
        title: "Time-based Media",
        description: "Audio and video content needs captions, descriptions and transcripts",
    },
    SectionMetadata {
        code: SectionCode::Adaptable,
        title: "Adaptable",
        description: "Content must be presentable in different ways without losing structure or meaning",
    },
    SectionMetadata {
        code: SectionCode::Distinguishable,
        title: "Distinguishable",
        description: "Users must be able to see and hear content, including separating foreground from background",
    },
];

/// Title and description for a section code; unknown codes fall back to
/// generic text.
pub fn metadata_for(code: SectionCode) -> (&'static str, &'static str) {
    SECTIONS
        .iter()
        .find(|m| m.code == code)
        .map(|m| (m.title, m.description))
        .unwrap_or(("Accessibility", "Issues detected in this category"))
}
