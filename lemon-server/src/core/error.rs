use thiserror::Error;

use crate::utils::AppError;

/// Errors that stop the server process
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("startup failed: {0}")]
    Startup(#[from] AppError),

    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Server lifecycle Result
pub type Result<T> = std::result::Result<T, ServerError>;
