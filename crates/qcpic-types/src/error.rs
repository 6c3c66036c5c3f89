use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numerical instability in mode {mode}, component {component}: {message}")]
    NumericalInstability {
        mode: usize,
        component: String,
        message: String,
    },

    #[error("Configuration mismatch: {0}")]
    ConfigMismatch(String),

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PicResult<T> = Result<T, PicError>;
