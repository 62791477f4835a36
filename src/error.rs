use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("no foreground surface available to present the authorization challenge")]
    ActivityUnavailable,
    #[error("invalid relaunch signal: {0}")]
    InvalidSignal(String),
    #[error("invalid scenario step: {0}")]
    Scenario(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
