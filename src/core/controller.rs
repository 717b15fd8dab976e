use std::sync::Arc;

use axum::http::StatusCode;

use crate::catalog::factory::Repositories;
use crate::core::domain::Configuration;
use crate::core::library::LibraryError;

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub repos: Arc<Repositories>,
}

impl AppState {
    pub fn new(site_name: &str, repos: Repositories) -> AppState {
        AppState {
            config: Configuration::new(site_name),
            repos: Arc::new(repos),
        }
    }
}

pub type ServerError = (StatusCode, String);

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            LibraryError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            LibraryError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            LibraryError::Database { .. } => {
                tracing::error!(retryable = err.retryable(), error = %err, "database failure");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
            LibraryError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
        }
    }
}
