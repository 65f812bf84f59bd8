use std::path::Path;

use crate::errors::AliraError;
use super::types::ScannerConfig;

pub async fn parse_config(path: &Path) -> Result<ScannerConfig, AliraError> {
    if !path.exists() {
        return Err(AliraError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(AliraError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: ScannerConfig = serde_yaml::from_str(&content)?;

    validate_thresholds(&config)?;

    Ok(config)
}

/// Reject threshold values that would make every rule vacuous or the report
/// malformed.
fn validate_thresholds(config: &ScannerConfig) -> Result<(), AliraError> {
    if config.min_contrast_ratio < 1.0 || config.min_contrast_ratio > 21.0 {
        return Err(AliraError::Config(format!(
            "min_contrast_ratio must be within 1.0..=21.0, got {}",
            config.min_contrast_ratio
        )));
    }
    if config.min_font_px <= 0.0 {
        return Err(AliraError::Config(format!(
            "min_font_px must be positive, got {}",
            config.min_font_px
        )));
    }
    if config.min_line_height <= 0.0 {
        return Err(AliraError::Config(format!(
            "min_line_height must be positive, got {}",
            config.min_line_height
        )));
    }
    if config.max_examples_per_group == 0 {
        return Err(AliraError::Config(
            "max_examples_per_group must be at least 1".into(),
        ));
    }
    if config.max_snippet_chars < 16 {
        return Err(AliraError::Config(
            "max_snippet_chars must be at least 16".into(),
        ));
    }
    Ok(())
}
