//! Error types for vastu-survey

use thiserror::Error;

/// Survey error type
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Wall needs at least 3 points, got {count}")]
    InsufficientPoints { count: usize },

    #[error("Degenerate fit: {points} points have no spread on either axis")]
    DegenerateFit { points: usize },

    #[error("Degenerate line: A and B are both zero")]
    DegenerateLine,

    #[error("Planning error: {0}")]
    Planning(String),

    #[error("Hardware error: {0}")]
    Hardware(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Missing element <{0}>")]
    MissingElement(String),

    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid attribute '{attribute}' on <{element}>: {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SurveyError {
    /// True for errors raised while reading or writing a persisted map.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            SurveyError::Io(_)
                | SurveyError::Xml(_)
                | SurveyError::MissingElement(_)
                | SurveyError::MissingAttribute { .. }
                | SurveyError::InvalidAttribute { .. }
        )
    }
}

impl From<quick_xml::Error> for SurveyError {
    fn from(e: quick_xml::Error) -> Self {
        SurveyError::Xml(e.to_string())
    }
}

impl From<toml::de::Error> for SurveyError {
    fn from(e: toml::de::Error) -> Self {
        SurveyError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
