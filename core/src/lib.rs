pub mod axe;
pub mod browser;
pub mod error;
pub mod lighthouse;
pub mod report;
pub mod wave;

pub use axe::{
    render_violation_table, AxeEvaluator, AxeResults, AxeViolation, AXE_SOURCE_ENV,
    DEFAULT_AXE_BUNDLE_URL,
};
pub use browser::{BrowserSession, DEFAULT_NAVIGATION_TIMEOUT};
pub use error::{CheckError, Result};
pub use lighthouse::{AuditOutcome, AuditRunner, DEFAULT_LIGHTHOUSE_BIN};
pub use report::{
    AxeIssue, ReportWriter, RuleScanReport, WaveReport, RULE_REPORT_PREFIX, WAVE_REPORT_PREFIX,
};
pub use wave::{
    CategoryCount, WaveCategories, WaveClient, WaveConfig, DEFAULT_WAVE_ENDPOINT,
    WAVE_API_KEY_ENV, WAVE_ENDPOINT_ENV,
};
