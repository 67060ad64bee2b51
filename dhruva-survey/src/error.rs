//! Error types for DhruvaSurvey

use thiserror::Error;
use vastu_survey::SurveyError;

/// DhruvaSurvey error type
#[derive(Error, Debug)]
pub enum DhruvaError {
    #[error("Survey error: {0}")]
    Survey(#[from] SurveyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Thread error: {0}")]
    Thread(String),
}

impl From<toml::de::Error> for DhruvaError {
    fn from(e: toml::de::Error) -> Self {
        DhruvaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DhruvaError>;
