use axum::{extract::rejection::JsonRejection, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;

use crate::error::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotRegistered(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        use AppError::*;
        match self {
            Validation(_) | NotRegistered(_) => StatusCode::BAD_REQUEST,
            Conflict(_) => StatusCode::CONFLICT,
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                "internal server error".to_owned()
            }
            err => {
                tracing::debug!(%status, error = %err, "request rejected");
                err.to_string()
            }
        };

        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        use Error::*;
        match err {
            Missing(_) | SelfChat(_) => AppError::Validation(err.to_string()),
            AlreadyRegistered(_) => AppError::Conflict(err.to_string()),
            NotRegistered { .. } => AppError::NotRegistered(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Validation(format!("invalid input: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Role;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (Error::Missing("sender"), StatusCode::BAD_REQUEST),
            (Error::SelfChat("+1".into()), StatusCode::BAD_REQUEST),
            (Error::AlreadyRegistered("+1".into()), StatusCode::CONFLICT),
            (
                Error::NotRegistered { role: Role::Receiver, handle: "+1".into() },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn internal_error_hides_detail() {
        let response = AppError::from(anyhow::anyhow!("lock poisoned at table 7")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
