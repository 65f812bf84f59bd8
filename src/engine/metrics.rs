use serde::{Deserialize, Serialize};

/// Counters accumulated over one page walk. Informational only; the score is
/// driven purely by issue penalties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanMetrics {
    /// Elements enumerated from the rendered document.
    pub elements_scanned: usize,
    /// Rule-module invocations that failed and were skipped.
    pub module_failures: usize,
    /// Findings dropped because their element snippet could not be serialized.
    pub discarded_findings: usize,
}
