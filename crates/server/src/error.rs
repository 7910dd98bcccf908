//! Application error handling

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use symptocare_core::{CoreError, ErrorBody, ErrorKind};

use crate::views;

/// Application error type, rendered as a JSON [`ErrorBody`]
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            AppError::BadRequest(msg) => ErrorBody::invalid(msg.as_str()),
            AppError::NotFound(msg) => ErrorBody::new(ErrorKind::NotFound, msg.as_str()),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Body rejections are reported as 400 with the JSON envelope
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Same errors, rendered as an HTML page for the form routes
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.0.status(), Html(views::error_page(self.0.message()))).into_response()
    }
}
