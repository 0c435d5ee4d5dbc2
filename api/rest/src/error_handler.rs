use actix_multipart::MultipartError;
use actix_web::{
    body::{to_bytes, MessageBody},
    dev::ServiceResponse,
    error::{InternalError, JsonPayloadError, PathError, PayloadError},
    http::{header, StatusCode},
    middleware::ErrorHandlerResponse,
    HttpRequest, Result,
};
use futures::executor;
use vx_dao::upload;
use vx_error::Error;

use crate::model::Response;

/// Rewrites framework-generated error bodies (plain text or empty) into the
/// JSON error envelope. Responses that already carry JSON pass through.
pub fn default_error_handler<B: MessageBody>(
    svc_res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    if let Some(content_type) = svc_res.response().headers().get(header::CONTENT_TYPE) {
        if let Ok(content_type) = content_type.to_str() {
            if content_type.to_lowercase().starts_with("application/json") {
                return Ok(ErrorHandlerResponse::Response(svc_res.map_into_left_body()));
            }
        }
    }

    let (req, res) = svc_res.into_parts();

    let status_code = res.status();
    let body = executor::block_on(async {
        match to_bytes(res.into_body()).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => err.into().to_string(),
        }
    });
    let message = if body.trim().is_empty() {
        status_code
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned()
    } else {
        body
    };

    let res = Response::error_raw(&status_code, &message);

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}

pub fn json_error_handler(err: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_owned(),
        err => format!("Invalid request body: {err}"),
    };
    let res = Response::error_raw(&StatusCode::BAD_REQUEST, &message);
    InternalError::from_response(err, res).into()
}

/// Ids are uuids; anything else cannot name an existing item.
pub fn path_error_handler(err: PathError, _: &HttpRequest) -> actix_web::Error {
    let res = Response::error_raw(&StatusCode::NOT_FOUND, &Error::item_not_found().to_string());
    InternalError::from_response(err, res).into()
}

pub fn multipart_error_handler(
    max_size: usize,
) -> impl Fn(MultipartError, &HttpRequest) -> actix_web::Error + Send + Sync + 'static {
    move |err, _| {
        let message = match &err {
            MultipartError::Payload(PayloadError::Overflow) => {
                upload::too_large(&max_size).to_string()
            }
            err => err.to_string(),
        };
        let res = Response::error_raw(&StatusCode::BAD_REQUEST, &message);
        InternalError::from_response(err, res).into()
    }
}
