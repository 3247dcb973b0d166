use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    crossword::{LayoutError, WordListError},
    store::StoreError,
};

/// Errors returned from API handlers, rendered as `{ "message": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    WordList(#[from] WordListError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Json(_) | ApiError::WordList(_) | ApiError::Layout(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(WordListError::TooFewWords { min: 2 });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Please enter at least 2 words");

        let err = ApiError::from(StoreError::WordNotFound(7));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
