use crate::store::StoreUnavailable;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Debug, Error)]
pub enum RankError {
    /// An increment failed. Earlier increments of the same event stay applied.
    #[error("failed to update leaderboard: {0}")]
    Update(#[source] StoreUnavailable),

    #[error("failed to read leaderboard: {0}")]
    Read(#[source] StoreUnavailable),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl RankError {
    /// Underlying store failure for the two store-facing kinds.
    pub fn store_cause(&self) -> Option<&StoreUnavailable> {
        match self {
            RankError::Update(cause) | RankError::Read(cause) => Some(cause),
            RankError::BadRequest(_) => None,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for RankError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RankError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RankError::Update(_) | RankError::Read(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
