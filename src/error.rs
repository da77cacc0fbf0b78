use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymptomateError {
    #[error("Rules error: {0}")]
    Rules(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis error: {0}")]
    Analysis(String),
}
