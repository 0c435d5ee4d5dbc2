use actix_multipart::form::MultipartForm;
use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use vx_dao::upload::UploadDao;

use crate::{
    context::ApiRestCtx,
    guard,
    model::{
        upload::{
            UploadDocumentReqForm, UploadFileResJson, UploadImageReqForm, UploadImageResJson,
            UploadLogoReqForm, UploadReqForm,
        },
        Response,
    },
};

pub fn upload_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload/upload", web::post().to(upload_image))
        .route("/upload/partner", web::post().to(upload_logo))
        .route("/upload/document", web::post().to(upload_document));
}

async fn upload_image(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    form: MultipartForm<UploadImageReqForm>,
) -> HttpResponse {
    match store(&ctx, &auth, &form.0).await {
        Ok(url) => Response::data(&StatusCode::OK, UploadImageResJson::new(&url)),
        Err(res) => res,
    }
}

async fn upload_logo(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    form: MultipartForm<UploadLogoReqForm>,
) -> HttpResponse {
    match store(&ctx, &auth, &form.0).await {
        Ok(url) => Response::data(&StatusCode::OK, UploadImageResJson::new(&url)),
        Err(res) => res,
    }
}

async fn upload_document(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    form: MultipartForm<UploadDocumentReqForm>,
) -> HttpResponse {
    match store(&ctx, &auth, &form.0).await {
        Ok(url) => Response::data(&StatusCode::OK, UploadFileResJson::new(&url)),
        Err(res) => res,
    }
}

async fn store(
    ctx: &ApiRestCtx,
    auth: &Option<BearerAuth>,
    form: &impl UploadReqForm,
) -> Result<String, HttpResponse> {
    guard::admin_claim(ctx, auth).map_err(|err| Response::error(&err, ctx.mode()))?;

    let Some(file_path) = form.file_path() else {
        return Err(Response::error_raw(
            &StatusCode::BAD_REQUEST,
            "No file uploaded",
        ));
    };

    let upload_data = UploadDao::new(&form.file_name(), &form.size(), ctx.upload().max_size())
        .map_err(|err| Response::error(&err, ctx.mode()))?;

    let url = upload_data
        .save(ctx.upload().path(), ctx.upload().public_path(), file_path)
        .await
        .map_err(|err| Response::error(&err, ctx.mode()))?;

    vx_log::info(
        None,
        format!(
            "[ApiRestServer] Stored upload {} ({} bytes)",
            upload_data.stored_name(),
            upload_data.size()
        ),
    );

    Ok(url)
}
