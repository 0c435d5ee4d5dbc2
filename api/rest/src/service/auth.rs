use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use validator::Validate;
use vx_dao::{admin::AdminDao, otp_code::OtpCodeDao};
use vx_error::Error;
use vx_mailer::{template, MailPayload};
use vx_sms::SmsPayload;

use crate::{
    context::ApiRestCtx,
    guard,
    model::{
        auth::{
            AdminResJson, RequestOtpReqJson, RequestOtpResJson, VerifyOtpReqJson,
            VerifyOtpResJson,
        },
        Response,
    },
    service::send_mail,
};

/// Same answer whether or not the email belongs to an admin.
const OTP_SENT_MESSAGE: &str = "If this email is registered, an OTP has been sent";

pub fn auth_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/request-otp", web::post().to(request_otp))
        .route("/auth/resend-otp", web::post().to(request_otp))
        .route("/auth/verify-otp", web::post().to(verify_otp))
        .route("/auth/me", web::get().to(me));
}

async fn request_otp(ctx: web::Data<ApiRestCtx>, data: web::Json<RequestOtpReqJson>) -> HttpResponse {
    if data.validate().is_err() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "Invalid email address");
    }

    let admin_data = match AdminDao::db_select_by_email(ctx.dao().db(), data.email()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    let otp_code = match admin_data {
        Some(admin_data) => {
            let otp_data = match OtpCodeDao::new(admin_data.email(), ctx.otp_ttl()) {
                Ok(data) => data,
                Err(err) => return Response::error(&err, ctx.mode()),
            };
            // Issued off the response path so known and unknown emails answer alike.
            let (ctx, otp_code) = (ctx.clone(), otp_data.code().to_owned());
            tokio::spawn((|| async move {
                if let Err(err) = otp_data.db_insert(ctx.dao().db()).await {
                    vx_log::error(
                        None,
                        format!(
                            "[ApiRestServer] Failed to store OTP for {}: {err}",
                            otp_data.email()
                        ),
                    );
                    return;
                }
                deliver_otp(&ctx, &otp_data);
            })());
            Some(otp_code)
        }
        None => {
            vx_log::debug(
                None,
                format!("[ApiRestServer] OTP requested for unknown email {}", data.email()),
            );
            None
        }
    };

    let echoed = otp_code
        .filter(|_| ctx.mode().is_development())
        .map(|otp_code| {
            vx_log::debug(
                None,
                format!("[ApiRestServer] Issued OTP {otp_code} for {}", data.email()),
            );
            otp_code
        });

    Response::data(&StatusCode::OK, RequestOtpResJson::new(OTP_SENT_MESSAGE, &echoed))
}

async fn verify_otp(ctx: web::Data<ApiRestCtx>, data: web::Json<VerifyOtpReqJson>) -> HttpResponse {
    if data.email().trim().is_empty() || data.otp().trim().is_empty() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "Email and OTP are required");
    }

    let otp_data = match OtpCodeDao::verify(ctx.dao().db(), data.email(), data.otp()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    let admin_data = match AdminDao::db_select_by_email(ctx.dao().db(), otp_data.email()).await {
        Ok(Some(data)) => data,
        Ok(None) => {
            return Response::error(
                &Error::Unauthenticated("Admin account not found".to_owned()),
                ctx.mode(),
            )
        }
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    let token = match ctx
        .token()
        .jwt()
        .encode(admin_data.id(), admin_data.email(), admin_data.role())
    {
        Ok(token) => token,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    vx_log::info(
        None,
        format!("[ApiRestServer] Admin {} signed in", admin_data.email()),
    );

    Response::data(
        &StatusCode::OK,
        VerifyOtpResJson::new(AdminResJson::from(&admin_data), &token),
    )
}

async fn me(ctx: web::Data<ApiRestCtx>, auth: Option<BearerAuth>) -> HttpResponse {
    let claim = match guard::admin_claim(&ctx, &auth) {
        Ok(claim) => claim,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    match AdminDao::db_select(ctx.dao().db(), claim.sub()).await {
        Ok(data) => Response::data(&StatusCode::OK, AdminResJson::from(&data)),
        Err(Error::NotFound(_)) => Response::error(
            &Error::Unauthenticated("Admin account not found".to_owned()),
            ctx.mode(),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

fn deliver_otp(ctx: &ApiRestCtx, otp_data: &OtpCodeDao) {
    let minutes = (ctx.otp_ttl().as_secs() / 60).max(1);

    send_mail(
        ctx,
        MailPayload::new(
            otp_data.email(),
            "VortextSoft Admin Login - OTP Code",
            &format!(
                "Your admin login code is {}. It expires in {minutes} minutes.",
                otp_data.code()
            ),
            Some(template::render(
                "Admin",
                &format!(
                    "<p>Your admin login code is:</p>\
                     <p style=\"font-size: 28px; font-weight: bold; letter-spacing: 6px;\">{}</p>\
                     <p>It expires in {minutes} minutes. If you did not request it, ignore this email.</p>",
                    otp_data.code()
                ),
            )),
        ),
    );

    if let Some(sms) = ctx.sms() {
        if let Err(err) = sms.sender().send(SmsPayload::new(&format!(
            "Your VortextSoft admin login code is {}. It expires in {minutes} minutes.",
            otp_data.code()
        ))) {
            vx_log::error(None, format!("[ApiRestServer] {err}"));
        }
    }
}
