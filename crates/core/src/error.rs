use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizkitError {
    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Model field is not a rule collection: {0}")]
    NotACollection(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for VizkitError {
    fn from(e: serde_json::Error) -> Self {
        VizkitError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VizkitError>;
