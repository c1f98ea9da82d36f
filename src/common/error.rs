use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Invalid source data: {reason}")]
    InvalidSource { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

/// Failure of a single attribute lookup. Never fatal to a pipeline run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Buffer radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Coordinate out of range: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
