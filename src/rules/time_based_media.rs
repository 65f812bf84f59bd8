//! Time-based media (EAA.1.2): videos need captions and audio descriptions,
//! all media needs controls and a reachable transcript.

use async_trait::async_trait;

use crate::config::ScannerConfig;
use crate::dom::{DomInspector, Probe, SiblingSummary};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, Impact, SectionCode};

use super::{element_snippet, probe_bool, probe_json, probe_value, RuleModule};

pub struct TimeBasedMediaRule;

#[async_trait]
impl RuleModule for TimeBasedMediaRule {
    fn name(&self) -> &'static str {
        "time-based-media"
    }

    fn section(&self) -> SectionCode {
        SectionCode::TimeBasedMedia
    }

    async fn analyze(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let tag = element.tag_name().await?.to_lowercase();
        if tag != "video" && tag != "audio" {
            return Ok(());
        }

        let snippet = element_snippet(element, config).await;

        if element.attribute("controls").await?.is_none() {
            sink.push(AccessibilityIssue {
                section: SectionCode::TimeBasedMedia,
                rule_type: "mediaControls".to_string(),
                description: format!("<{}> element has no controls attribute, so keyboard users cannot pause or stop playback", tag),
                element: snippet.clone(),
                impact: Impact::High,
                score_impact: -10,
                suggestion: "Add the controls attribute so users can play, pause and adjust volume with the keyboard".to_string(),
                current_value: None,
            });
        }

        if tag == "video" {
            self.check_video_tracks(element, &snippet, sink).await?;
        }

        self.check_transcript(element, config, &tag, &snippet, sink)
            .await;

        Ok(())
    }
}

impl TimeBasedMediaRule {
    async fn check_video_tracks(
        &self,
        element: &dyn DomInspector,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) -> Result<(), AliraError> {
        let has_captions =
            probe_bool(element, Probe::HasDescendant("track[kind=\"captions\"]")).await;
        if !has_captions {
            let live = element
                .attribute("data-live")
                .await?
                .map_or(false, |v| v == "true");
            let rule_type = if live { "liveCaptions" } else { "captions" };
            sink.push(AccessibilityIssue {
                section: SectionCode::TimeBasedMedia,
                rule_type: rule_type.to_string(),
                description: if live {
                    "Live video has no caption track, excluding deaf and hard-of-hearing viewers in real time".to_string()
                } else {
                    "Video has no caption track, so deaf and hard-of-hearing users cannot access the audio content".to_string()
                },
                element: snippet.to_string(),
                impact: Impact::Critical,
                score_impact: -15,
                suggestion: "Add <track kind=\"captions\" src=\"captions.vtt\" srclang=\"en\"> inside the video element".to_string(),
                current_value: None,
            });
        }

        let has_descriptions =
            probe_bool(element, Probe::HasDescendant("track[kind=\"descriptions\"]")).await;
        if !has_descriptions {
            sink.push(AccessibilityIssue {
                section: SectionCode::TimeBasedMedia,
                rule_type: "audioDescription".to_string(),
                description: "Video has no audio description track for visual-only content".to_string(),
                element: snippet.to_string(),
                impact: Impact::High,
                score_impact: -10,
                suggestion: "Provide a <track kind=\"descriptions\"> describing important visual information for blind users".to_string(),
                current_value: None,
            });
        }

        Ok(())
    }

    /// A transcript counts when the aria-describedby target holds real text,
    /// the next sibling is marked as a transcript, or the surrounding
    /// container links to one.
    async fn check_transcript(
        &self,
        element: &dyn DomInspector,
        config: &ScannerConfig,
        tag: &str,
        snippet: &str,
        sink: &mut Vec<AccessibilityIssue>,
    ) {
        let described_len = probe_value(element, Probe::AriaDescribedByTextLength)
            .await
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if described_len > config.transcript_min_chars {
            return;
        }

        if let Some(sibling) = probe_json::<Option<SiblingSummary>>(element, Probe::NextSiblingSummary)
            .await
            .flatten()
        {
            let marker = format!(
                "{} {} {}",
                sibling.class_name, sibling.id, sibling.data_type
            )
            .to_lowercase();
            if marker.contains("transcript") {
                return;
            }
        }

        let hrefs: Vec<String> = probe_json(element, Probe::AncestorContainerLinkHrefs)
            .await
            .unwrap_or_default();
        if hrefs.iter().any(|h| h.to_lowercase().contains("transcript")) {
            return;
        }

        sink.push(AccessibilityIssue {
            section: SectionCode::TimeBasedMedia,
            rule_type: "transcript".to_string(),
            description: format!("No transcript found for this <{}> element", tag),
            element: snippet.to_string(),
            impact: Impact::High,
            score_impact: -10,
            suggestion: "Publish a text transcript next to the media and link it with aria-describedby or a nearby anchor".to_string(),
            current_value: None,
        });
    }
}
