use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::{
    error_handler::{json_error_handler, multipart_error_handler, path_error_handler},
    service::{
        auth::auth_api, meeting::meeting_api, message::message_api, resource::resource_api,
        root::root_api, upload::upload_api,
    },
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(root_api)
        .service(
            web::scope("/api")
                .configure(auth_api)
                .configure(meeting_api)
                .configure(message_api)
                .configure(upload_api)
                .configure(resource_api),
        );
}

/// Caps the whole multipart body at `max_size` bytes.
pub fn multipart_config(max_size: &usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(*max_size)
        .error_handler(multipart_error_handler(*max_size))
}
