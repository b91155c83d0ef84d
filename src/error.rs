use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccuracyError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The {document} document must be a JSON object at its root")]
    NotAnObject { document: String },

    #[error("Invalid validator configuration: {0}")]
    InvalidConfig(String),

    #[error("Computed {component} score is not a finite number")]
    NonFiniteScore { component: String },
}

pub type Result<T> = std::result::Result<T, AccuracyError>;
