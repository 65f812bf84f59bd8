use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::dom::{BrowserDriver, PageDriver, WaitPolicy};
use crate::errors::AliraError;
use crate::models::{AccessibilityIssue, AnalysisResult};
use crate::report::aggregator::aggregate;
use crate::rules::{default_rules, RuleModule};
use super::metrics::ScanMetrics;

/// Drives one full page analysis: load, walk every element through every
/// rule module, aggregate into a scored report.
pub struct Scanner {
    browser: Arc<dyn BrowserDriver>,
    rules: Vec<Box<dyn RuleModule>>,
    config: ScannerConfig,
    cancel_token: CancellationToken,
}

impl Scanner {
    pub fn new(browser: Arc<dyn BrowserDriver>) -> Self {
        Self {
            browser,
            rules: default_rules(),
            config: ScannerConfig::default(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the scanner's cancel token with an external one so callers
    /// can abort a running analysis.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Replace the rule registry. The given order is the evaluation order.
    pub fn with_rules(mut self, rules: Vec<Box<dyn RuleModule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Analyze one URL and produce a scored report.
    ///
    /// Page-load failures and cancellation fail the whole call; rule-module
    /// failures are absorbed per element and only reduce coverage. The page
    /// is closed exactly once on both paths.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, AliraError> {
        let started = Instant::now();
        info!(url, "Analysis started");

        let page = self.browser.new_page().await?;
        let outcome = self.scan_page(page.as_ref(), url).await;
        if let Err(e) = page.close().await {
            warn!(error = %e, "Failed to close page");
        }

        let (findings, metrics) = outcome?;
        let duration_ms = started.elapsed().as_millis() as u64;
        let result = aggregate(url, findings, metrics, duration_ms, &self.config);

        info!(
            url,
            score = result.score,
            issues = result.detailed_issues.len(),
            "Analysis complete"
        );
        Ok(result)
    }

    async fn scan_page(
        &self,
        page: &dyn PageDriver,
        url: &str,
    ) -> Result<(Vec<AccessibilityIssue>, ScanMetrics), AliraError> {
        page.goto(url, WaitPolicy::NetworkIdle).await?;

        let elements = page.query_all("*").await?;
        debug!(elements = elements.len(), "Walking rendered document");

        let mut findings = Vec::new();
        let mut metrics = ScanMetrics::default();

        for (index, element) in elements.iter().enumerate() {
            if self.cancel_token.is_cancelled() {
                info!(url, elements_scanned = metrics.elements_scanned, "Analysis cancelled");
                return Err(AliraError::Cancelled);
            }

            for rule in &self.rules {
                if let Err(e) = rule
                    .analyze(element.as_ref(), &self.config, &mut findings)
                    .await
                {
                    metrics.module_failures += 1;
                    warn!(
                        rule = rule.name(),
                        element_index = index,
                        error = %e,
                        "Rule module failed, skipping element"
                    );
                }
            }
            metrics.elements_scanned += 1;
        }

        // Every reported issue must identify its element; findings that lost
        // their snippet to a serialization failure are dropped here.
        let before = findings.len();
        findings.retain(|f| !f.element.trim().is_empty());
        metrics.discarded_findings = before - findings.len();
        if metrics.discarded_findings > 0 {
            debug!(
                dropped = metrics.discarded_findings,
                "Dropped findings without element context"
            );
        }

        Ok((findings, metrics))
    }
}
