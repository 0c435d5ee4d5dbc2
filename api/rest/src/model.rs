use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use serde::Serialize;
use vx_config::app::AppConfigMode;
use vx_error::Error;

pub mod auth;
pub mod meeting;
pub mod message;
pub mod resource;
pub mod upload;

/// Failure envelope shared by every route.
#[derive(Serialize)]
pub struct ErrorRes {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

pub struct Response;

impl Response {
    pub fn data<T: Serialize>(status_code: &StatusCode, data: T) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(data),
            Err(err) => {
                vx_log::error(None, format!("[ApiRestServer] Failed to encode response: {err}"));
                Self::error_raw(&StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    /// Opaque failures are logged in full and reach the client as a generic
    /// message, with the detail attached only in development mode.
    pub fn error(err: &Error, mode: &AppConfigMode) -> HttpResponse {
        let status_code = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_opaque() {
            vx_log::error(None, format!("[ApiRestServer] {}: {err}", err.kind()));
            return HttpResponseBuilder::new(status_code).json(ErrorRes {
                error: "Internal server error".to_owned(),
                details: mode.is_development().then(|| err.to_string()),
            });
        }

        Self::error_raw(&status_code, &err.to_string())
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        vx_log::debug(None, format!("[ApiRestServer] {status_code}: {message}"));

        HttpResponseBuilder::new(*status_code).json(ErrorRes {
            error: message.to_owned(),
            details: None,
        })
    }
}

#[derive(Serialize)]
pub struct DeleteResJson {
    message: String,
}

impl DeleteResJson {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[derive(Serialize)]
pub struct CountResJson {
    count: i64,
}

impl CountResJson {
    pub fn new(count: &i64) -> Self {
        Self { count: *count }
    }
}
