use super::types::AliraError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub recoverable: bool,
}

impl AliraError {
    /// Classify this error to determine its type and whether the analysis
    /// can absorb it locally.
    ///
    /// Recoverable errors are caught at the rule-module boundary and treated
    /// as "no issue detected" for the element at hand. Non-recoverable errors
    /// fail the whole `analyze_url` call.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Absorbed at the rule-module / adapter boundary
            AliraError::Evaluation(_) => ErrorClassification {
                error_type: "EvaluationError",
                recoverable: true,
            },
            AliraError::Browser(_) => ErrorClassification {
                error_type: "BrowserError",
                recoverable: true,
            },
            AliraError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                recoverable: true,
            },
            AliraError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                recoverable: true,
            },
            AliraError::Io(_) => ErrorClassification {
                error_type: "IoError",
                recoverable: true,
            },

            // Fatal for the whole analysis
            AliraError::Navigation(_) => ErrorClassification {
                error_type: "NavigationError",
                recoverable: false,
            },
            AliraError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                recoverable: false,
            },
            AliraError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                recoverable: false,
            },
            AliraError::Cancelled => ErrorClassification {
                error_type: "CancelledError",
                recoverable: false,
            },
            AliraError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                recoverable: false,
            },
        }
    }

    /// Shorthand for `classify().recoverable`.
    pub fn is_recoverable(&self) -> bool {
        self.classify().recoverable
    }
}
