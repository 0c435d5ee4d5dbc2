use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use logger::logger_format;
use tokio_util::sync::CancellationToken;

pub use configure::{configure, multipart_config};

mod configure;
pub mod context;
mod error_handler;
mod guard;
mod logger;
mod model;
mod service;

pub struct ApiRestServer {
    address: String,
    allowed_origin: Option<String>,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(host: &str, port: &u16, allowed_origin: &Option<String>, ctx: ApiRestCtx) -> Self {
        vx_log::info(Some("⚡"), "[ApiRestServer] Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self {
            address,
            allowed_origin: allowed_origin.clone(),
            context,
        }
    }

    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        vx_log::info(Some("💫"), "[ApiRestServer] Running component");

        let allowed_origin = self.allowed_origin;
        let context = self.context;

        let server = HttpServer::new(move || {
            let cors = match &allowed_origin {
                Some(origin) => Cors::default()
                    .allowed_origin(origin)
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
                None => Cors::permissive(),
            };
            let upload = context.upload();

            App::new()
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .wrap(Logger::new(logger_format()))
                .wrap(cors)
                .app_data(context.clone())
                .app_data(multipart_config(upload.max_size()))
                .service(Files::new(upload.public_path(), upload.path()))
                .configure(configure)
        })
        .bind(&self.address)?
        .disable_signals()
        .run();
        let server_handle = server.handle();

        tokio::select! {
            _ = cancel_token.cancelled() => {}
            res = server => res?,
        }

        vx_log::info(None, "[ApiRestServer] Shutting down component");
        server_handle.stop(true).await;

        Ok(())
    }
}
