use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::plant::ErrorResponse;
use crate::store::StoreError;

/// Service operation that touched the store when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    TotalOutput,
    NetworkState,
    Health,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Load => "load failed",
            Stage::TotalOutput => "total-output failed",
            Stage::NetworkState => "network-state failed",
            Stage::Health => "health failed",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{stage}")]
    Store {
        stage: Stage,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ServiceError::InvalidInput(msg.into())
    }

    pub fn store(stage: Stage, source: StoreError) -> Self {
        ServiceError::Store { stage, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
