use crate::error::Result;
use crate::wave::WaveCategories;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

pub const RULE_REPORT_PREFIX: &str = "report";
pub const WAVE_REPORT_PREFIX: &str = "wave_report";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxeIssue {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleScanReport {
    pub url: String,
    pub axe_violations: usize,
    pub axe_issues: Vec<AxeIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_score: Option<f64>,
}

impl RuleScanReport {
    pub fn new(url: impl Into<String>, issues: Vec<AxeIssue>) -> Self {
        Self {
            url: url.into(),
            axe_violations: issues.len(),
            axe_issues: issues,
            lighthouse_score: None,
        }
    }

    pub fn with_audit_score(mut self, score: f64) -> Self {
        self.lighthouse_score = Some(score);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveReport {
    pub url: String,
    pub errors: u64,
    pub alerts: u64,
    pub features: u64,
    pub structure: u64,
    pub contrast: u64,
    pub total_issues: u64,
    pub accessibility_score: u64,
}

impl WaveReport {
    /// `total_issues` excludes the informational feature category;
    /// `accessibility_score` is `100 - 2 * (errors + alerts)` floored at zero.
    pub fn from_categories(url: impl Into<String>, categories: &WaveCategories) -> Self {
        let errors = categories.error.count;
        let alerts = categories.alert.count;
        let features = categories.feature.count;
        let structure = categories.structure.count;
        let contrast = categories.contrast.count;

        let penalty = 2 * (errors + alerts) as i128;
        let accessibility_score = (100 - penalty).max(0) as u64;

        Self {
            url: url.into(),
            errors,
            alerts,
            features,
            structure,
            contrast,
            total_issues: errors + alerts + structure + contrast,
            accessibility_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes `<prefix>_<unixMillis>.json` and returns the path actually
    /// written, so callers log the real file name. The timestamp is taken
    /// exactly once per call.
    pub fn write<T: Serialize>(&self, prefix: &str, report: &T) -> Result<PathBuf> {
        let stamp = unix_millis();
        let path = self.output_dir.join(format!("{prefix}_{stamp}.json"));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(report)?;
        let mut file = fs::File::create(&path)?;
        file.write_all(&bytes)?;
        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn unix_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::CategoryCount;
    use serde_json::Value;

    fn categories(error: u64, alert: u64, feature: u64, structure: u64, contrast: u64) -> WaveCategories {
        WaveCategories {
            error: CategoryCount { count: error },
            alert: CategoryCount { count: alert },
            feature: CategoryCount { count: feature },
            structure: CategoryCount { count: structure },
            contrast: CategoryCount { count: contrast },
        }
    }

    #[test]
    fn total_issues_excludes_features() {
        let report = WaveReport::from_categories("https://exemplo.com", &categories(3, 5, 42, 7, 2));
        assert_eq!(report.total_issues, 3 + 5 + 7 + 2);
        assert_eq!(report.features, 42);
    }

    #[test]
    fn accessibility_score_clamps_at_zero() {
        let report = WaveReport::from_categories("https://exemplo.com", &categories(60, 0, 0, 0, 0));
        assert_eq!(report.accessibility_score, 0);

        let report = WaveReport::from_categories("https://exemplo.com", &categories(10, 5, 0, 0, 0));
        assert_eq!(report.accessibility_score, 100 - 2 * 15);
    }

    #[test]
    fn rule_report_counts_and_preserves_order() {
        let issues = vec![
            AxeIssue {
                id: "a".to_string(),
                description: "first".to_string(),
            },
            AxeIssue {
                id: "b".to_string(),
                description: "second".to_string(),
            },
            AxeIssue {
                id: "c".to_string(),
                description: "third".to_string(),
            },
        ];
        let report = RuleScanReport::new("https://exemplo.com", issues);
        assert_eq!(report.axe_violations, 3);

        let ids: Vec<&str> = report.axe_issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn rule_report_without_audit_score_omits_the_field() {
        let report = RuleScanReport::new("https://exemplo.com", Vec::new());
        let value: Value = serde_json::to_value(&report).expect("report serializes");
        let object = value.as_object().expect("report is an object");
        assert!(!object.contains_key("lighthouse_score"));
        assert_eq!(object["axe_violations"], 0);
        assert_eq!(object["axe_issues"], Value::Array(Vec::new()));
    }

    #[test]
    fn audit_score_is_serialized_when_present() {
        let report = RuleScanReport::new("https://exemplo.com", Vec::new()).with_audit_score(85.0);
        let value: Value = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(value["lighthouse_score"], 85.0);
    }

    #[test]
    fn writer_uses_prefix_timestamp_naming_and_two_space_indent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let writer = ReportWriter::new(dir.path());

        let issues = ["a", "b", "c"]
            .iter()
            .map(|id| AxeIssue {
                id: id.to_string(),
                description: format!("violation {id}"),
            })
            .collect();
        let report = RuleScanReport::new("https://exemplo.com", issues);
        let path = writer
            .write(RULE_REPORT_PREFIX, &report)
            .expect("report written");

        let name = path.file_name().expect("file name").to_string_lossy();
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".json"));
        let stamp = &name["report_".len()..name.len() - ".json".len()];
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));

        let contents = fs::read_to_string(&path).expect("report readable");
        assert!(contents.contains("  \"url\": \"https://exemplo.com\""));

        let parsed: RuleScanReport = serde_json::from_str(&contents).expect("round-trips");
        assert_eq!(parsed.axe_violations, 3);
        let ids: Vec<&str> = parsed.axe_issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
