use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to launch browser: {0}")]
    BrowserLaunch(String),
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("failed to load axe-core bundle: {0}")]
    EvaluatorSource(String),
    #[error("axe-core evaluation failed: {0}")]
    Evaluator(String),
    #[error("lighthouse audit failed: {0}")]
    Audit(String),
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
