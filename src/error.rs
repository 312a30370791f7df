// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Server-side error enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Errors a quiz session can run into on the client side.
///
/// Every failure is scoped to the session: the controller either rejects the
/// action and stays `Active`, or parks in `Failed` until the user retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Submit was requested while some questions have no recorded answer.
    /// Holds the 0-based indices of the unanswered questions.
    IncompleteSubmission { missing: Vec<usize> },

    /// An option selection pointed outside the loaded bank.
    InvalidSelection { question: usize, option: usize },

    /// The action is not available in the current phase.
    NotActive(String),

    /// The request never produced an HTTP response.
    Transport(String),

    /// The server answered with a non-success status.
    Status { status: u16, message: String },

    /// The server answered, but the body is missing fields or inconsistent.
    BadResponse(String),

    Config(String),

    Io(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IncompleteSubmission { missing } => {
                let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
                write!(
                    f,
                    "Please answer all questions before submitting. Unanswered: {}",
                    numbers.join(", ")
                )
            }
            QuizError::InvalidSelection { question, option } => write!(
                f,
                "Option {} does not exist for question {}",
                option + 1,
                question + 1
            ),
            QuizError::NotActive(phase) => write!(f, "Quiz is not accepting input ({})", phase),
            QuizError::Transport(msg) => write!(f, "Could not reach the quiz server: {}", msg),
            QuizError::Status { status, message } => {
                write!(f, "Quiz server returned {}: {}", status, message)
            }
            QuizError::BadResponse(msg) => write!(f, "Bad response from quiz server: {}", msg),
            QuizError::Config(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {}

/// Decoding failures are reported as bad responses, everything else as transport.
impl From<reqwest::Error> for QuizError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            QuizError::BadResponse(err.to_string())
        } else {
            QuizError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::BadResponse(err.to_string())
    }
}

impl From<validator::ValidationErrors> for QuizError {
    fn from(err: validator::ValidationErrors) -> Self {
        QuizError::BadResponse(err.to_string())
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::Io(err.to_string())
    }
}
