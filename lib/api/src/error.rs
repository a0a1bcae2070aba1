use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use pathmatch_recommend::RecommendError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced to HTTP clients as `{"detail": "..."}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "detail": self.to_string()
        }))
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::EmptyPool => ApiError::BadRequest(err.to_string()),
            RecommendError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            other => {
                error!(error = %other, "Recommendation failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        error!(error = %err, "Blocking task failed");
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(RecommendError::EmptyPool).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RecommendError::UserNotFound("x".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        let missing = RecommendError::MissingField {
            entity: "job",
            field: "_id",
        };
        assert_eq!(ApiError::from(missing).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
