use crate::error::{CheckError, Result};
use serde::Deserialize;
use std::process::Command;
use std::time::Instant;

pub const DEFAULT_LIGHTHOUSE_BIN: &str = "lighthouse";

/// Invokes the Lighthouse CLI scoped to the accessibility category. The CLI
/// launches its own dedicated browser process; the audit never shares the
/// session used for rule evaluation.
#[derive(Debug, Clone)]
pub struct AuditRunner {
    binary: String,
    extra_flags: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AuditOutcome {
    /// Accessibility category score scaled to 0-100; 0 when the category or
    /// its score is absent from the audit output.
    pub score: f64,
    pub duration_ms: u128,
}

impl AuditRunner {
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_LIGHTHOUSE_BIN.to_string(),
            extra_flags: None,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_extra_flags(mut self, flags: impl Into<String>) -> Self {
        self.extra_flags = Some(flags.into());
        self
    }

    fn build_args(&self, url: &str) -> Result<Vec<String>> {
        let mut args = vec![
            url.to_string(),
            "--only-categories=accessibility".to_string(),
            "--output=json".to_string(),
            "--quiet".to_string(),
            "--chrome-flags=--headless".to_string(),
        ];

        if let Some(flags) = &self.extra_flags {
            let extra = shell_words::split(flags)
                .map_err(|err| CheckError::Audit(format!("failed to parse extra flags: {err}")))?;
            args.extend(extra);
        }

        Ok(args)
    }

    pub fn run(&self, url: &str) -> Result<AuditOutcome> {
        let args = self.build_args(url)?;

        let timer = Instant::now();
        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|err| CheckError::Audit(format!("failed to execute '{}': {err}", self.binary)))?;
        let duration_ms = timer.elapsed().as_millis();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckError::Audit(format!(
                "'{}' exited with {:?} after {duration_ms} ms: {}",
                self.binary,
                output.status.code(),
                stderr.trim()
            )));
        }

        let report: AuditReport = serde_json::from_slice(&output.stdout)
            .map_err(|err| CheckError::Audit(format!("unreadable audit output: {err}")))?;

        Ok(AuditOutcome {
            score: report.accessibility_score(),
            duration_ms,
        })
    }
}

impl Default for AuditRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
struct AuditReport {
    #[serde(default)]
    categories: AuditCategories,
}

#[derive(Debug, Default, Deserialize)]
struct AuditCategories {
    #[serde(default)]
    accessibility: Option<AuditCategory>,
}

#[derive(Debug, Deserialize)]
struct AuditCategory {
    #[serde(default)]
    score: Option<f64>,
}

impl AuditReport {
    // Lighthouse reports the category score as a 0-1 float or null.
    fn accessibility_score(&self) -> f64 {
        self.categories
            .accessibility
            .as_ref()
            .and_then(|category| category.score)
            .unwrap_or(0.0)
            * 100.0
    }
}
