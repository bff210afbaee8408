use crate::error::{CheckError, Result};
use crate::report::AxeIssue;
use comfy_table::{presets::ASCII_FULL, Table};
use headless_chrome::Tab;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_AXE_BUNDLE_URL: &str = "https://cdn.jsdelivr.net/npm/axe-core@4.10/axe.min.js";
pub const AXE_SOURCE_ENV: &str = "AXE_CORE_PATH";

const BUNDLE_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

// Runs against the full document, never a sub-frame.
const AXE_RUN_EXPRESSION: &str =
    "axe.run(document, { resultTypes: ['violations'] }).then(results => JSON.stringify(results))";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AxeResults {
    #[serde(default)]
    pub violations: Vec<AxeViolation>,
}

impl AxeResults {
    /// Projects violations into report issues, keeping only `id` and
    /// `description` and preserving evaluator order.
    pub fn issues(&self) -> Vec<AxeIssue> {
        self.violations.iter().map(AxeViolation::issue).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AxeViolation {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: Option<String>,
}

impl AxeViolation {
    pub fn issue(&self) -> AxeIssue {
        AxeIssue {
            id: self.id.clone(),
            description: self.description.clone(),
        }
    }
}

/// Holds the axe-core JavaScript bundle and runs it inside a loaded page.
pub struct AxeEvaluator {
    script: String,
}

impl AxeEvaluator {
    pub fn from_script(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let script = fs::read_to_string(path)
            .map_err(|err| CheckError::EvaluatorSource(format!("{}: {err}", path.display())))?;
        Ok(Self::from_script(script))
    }

    pub fn fetch(url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(BUNDLE_FETCH_TIMEOUT)
            .build()
            .map_err(|err| CheckError::EvaluatorSource(err.to_string()))?;
        let script = http
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|err| CheckError::EvaluatorSource(format!("{url}: {err}")))?;
        Ok(Self::from_script(script))
    }

    /// Resolution order: explicit path, then `AXE_CORE_PATH`, then the CDN.
    pub fn load(source: Option<&Path>) -> Result<Self> {
        if let Some(path) = source {
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(AXE_SOURCE_ENV) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }
        Self::fetch(DEFAULT_AXE_BUNDLE_URL)
    }

    pub fn analyze(&self, tab: &Tab) -> Result<AxeResults> {
        tab.evaluate(&self.script, false)
            .map_err(|err| CheckError::Evaluator(format!("failed to inject bundle: {err}")))?;

        let evaluation = tab
            .evaluate(AXE_RUN_EXPRESSION, true)
            .map_err(|err| CheckError::Evaluator(err.to_string()))?;

        let raw = match evaluation.value {
            Some(Value::String(raw)) => raw,
            other => {
                return Err(CheckError::Evaluator(format!(
                    "unexpected evaluation result: {other:?}"
                )))
            }
        };

        parse_results(&raw)
    }
}

pub fn parse_results(raw: &str) -> Result<AxeResults> {
    serde_json::from_str(raw)
        .map_err(|err| CheckError::Evaluator(format!("unreadable evaluator output: {err}")))
}

pub fn render_violation_table(violations: &[AxeViolation]) -> String {
    let mut display = Table::new();
    display.load_preset(ASCII_FULL);
    display.set_header(vec!["regra", "impacto", "descrição"]);

    for violation in violations {
        display.add_row(vec![
            violation.id.clone(),
            violation.impact.clone().unwrap_or_else(|| "-".to_string()),
            violation.description.clone(),
        ]);
    }

    display.to_string()
}
