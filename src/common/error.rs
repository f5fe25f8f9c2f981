use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Car name {name} is already used")]
    DuplicateCarName { name: String },

    #[error("Position ({x}, {y}) is outside the {width} x {height} field")]
    OutOfBounds { x: i64, y: i64, width: i64, height: i64 },

    #[error("Scenario not found: {name}")]
    ScenarioNotFound { name: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
