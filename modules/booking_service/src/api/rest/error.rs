//! HTTP error mapping to rendered error pages

use super::views::View;
use crate::contract::BookingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error page response. The page never carries error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage {
    pub status: StatusCode,
}

impl ErrorPage {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        View::error(self.status).into_response()
    }
}

/// Map domain errors to error pages
pub fn map_domain_error(error: BookingError) -> ErrorPage {
    match error {
        BookingError::NotFound { kind, id } => {
            tracing::debug!(%kind, id, "not found");
            ErrorPage::not_found()
        }
        BookingError::Validation(errors) => {
            // Handlers re-render forms before this point
            tracing::warn!(%errors, "unhandled validation error");
            ErrorPage::internal()
        }
        other => {
            tracing::error!(error = %other, "request failed");
            ErrorPage::internal()
        }
    }
}

/// Router fallback for unknown paths
pub async fn not_found_fallback() -> ErrorPage {
    ErrorPage::not_found()
}
