use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use jotter_core::error::CoreError;
use jotter_core::markup::escape_html;
use jotter_core::route::NOTES_PATH;
use jotter_db::ClientError;

use crate::views::layout::render_bare_page;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ClientError`] for failed
/// remote operations. Implements [`IntoResponse`] to produce a small HTML
/// error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jotter_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A remote operation failed.
    #[error("Remote operation failed: {0}")]
    Client(#[from] ClientError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "Not found",
                    format!("{entity} not found."),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "Invalid input", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Error",
                        "An internal error occurred.".to_string(),
                    )
                }
            },

            AppError::Client(err) => {
                tracing::error!(error = %err, code = ?err.code, "Remote operation failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Error",
                    "The data store could not complete the request.".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error",
                    "An internal error occurred.".to_string(),
                )
            }
        };

        let main = format!(
            r#"<h1>{title}</h1><p>{}</p><p><a href="{NOTES_PATH}">Back to notes</a></p>"#,
            escape_html(&message)
        );
        (status, Html(render_bare_page(title, &main))).into_response()
    }
}
