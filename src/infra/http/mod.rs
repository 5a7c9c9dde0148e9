mod admin;
mod middleware;
mod public;

pub use public::{HttpState, build_router};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::error::DomainError;
use crate::infra::store::StoreError;

/// Map a domain error to a consistent HTTP error response for the form surfaces.
pub fn domain_error_to_http(source: &'static str, err: DomainError) -> HttpError {
    match err {
        DomainError::NotFound { .. } => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            err.to_string(),
        ),
        DomainError::Validation { .. } => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Title and content are required",
            err.to_string(),
        ),
    }
}

fn store_health_response(result: Result<(), StoreError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::store_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
