use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinForgeError {
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Unsatisfiable Constraint: {0}")]
    UnsatisfiableConstraint(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

impl PinForgeError {
    /// Stable, machine-readable error kind surfaced at the request boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Config(_) => "config_error",
            Self::UnsatisfiableConstraint(_) => "unsatisfiable_constraint",
            Self::Io(_) | Self::Csv(_) => "storage_error",
            Self::NotFound(_) => "not_found",
        }
    }
}

pub type PfResult<T> = Result<T, PinForgeError>;
