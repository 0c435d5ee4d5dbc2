use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use vx_dao::message::MessageDao;
use vx_error::Error;
use vx_mailer::{template, MailPayload};

use crate::{
    context::ApiRestCtx,
    guard,
    model::{
        message::{
            InsertOneMessageReqJson, MessageReqPath, MessageResJson, ReplyMessageReqJson,
            ReplyMessageResJson,
        },
        CountResJson, DeleteResJson, Response,
    },
    service::send_mail,
};

pub fn message_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", web::get().to(find_many))
        .route("/contact", web::post().to(insert_one))
        .route("/contact/unread-count", web::get().to(unread_count))
        .route("/contact/reply", web::post().to(reply))
        .route("/contact/{id}/replied", web::patch().to(mark_replied))
        .route("/contact/{id}", web::delete().to(delete_one))
        .route("/email/send", web::post().to(reply));
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<InsertOneMessageReqJson>,
) -> HttpResponse {
    let message_data = match MessageDao::new(
        data.name(),
        data.email(),
        data.phone(),
        data.company(),
        data.subject(),
        data.message(),
    ) {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    if let Err(err) = message_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err, ctx.mode());
    }

    if let Some(notify_email) = ctx
        .mailer()
        .as_ref()
        .and_then(|mailer| mailer.notify_email().as_deref())
    {
        send_mail(&ctx, notification_mail(notify_email, &message_data));
    }

    Response::data(&StatusCode::CREATED, MessageResJson::from(&message_data))
}

async fn find_many(ctx: web::Data<ApiRestCtx>, auth: Option<BearerAuth>) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MessageDao::db_select_many(ctx.dao().db()).await {
        Ok(data) => Response::data(
            &StatusCode::OK,
            data.iter().map(MessageResJson::from).collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn unread_count(ctx: web::Data<ApiRestCtx>, auth: Option<BearerAuth>) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MessageDao::db_count_unreplied(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::OK, CountResJson::new(&count)),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn mark_replied(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MessageReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    let mut message_data = match MessageDao::db_select(ctx.dao().db(), path.id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    message_data.mark_replied();

    match message_data.db_update(ctx.dao().db()).await {
        Ok(_) => Response::data(&StatusCode::OK, MessageResJson::from(&message_data)),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MessageReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MessageDao::db_delete(ctx.dao().db(), path.id()).await {
        Ok(_) => Response::data(
            &StatusCode::OK,
            DeleteResJson::new("Item deleted successfully"),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn reply(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    data: web::Json<ReplyMessageReqJson>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    let missing: Vec<_> = [
        ("to", data.to()),
        ("subject", data.subject()),
        ("message", data.message()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        return Response::error(
            &Error::Validation(format!("Missing required fields: {}", missing.join(", "))),
            ctx.mode(),
        );
    }

    let Some(mailer) = ctx.mailer() else {
        return Response::error_raw(
            &StatusCode::INTERNAL_SERVER_ERROR,
            "Mailer is not configured",
        );
    };

    let mut message_data = match data.message_id() {
        Some(id) => match MessageDao::db_select(ctx.dao().db(), id).await {
            Ok(data) => Some(data),
            Err(err) => return Response::error(&err, ctx.mode()),
        },
        None => None,
    };

    let recipient_name = data
        .recipient_name()
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Valued Customer");
    let body_html = format!(
        "<p>{}</p>",
        template::escape(data.message().trim()).replace('\n', "<br>")
    );

    if let Err(err) = mailer.sender().send(MailPayload::new(
        data.to().trim(),
        data.subject().trim(),
        data.message().trim(),
        Some(template::render(recipient_name, &body_html)),
    )) {
        vx_log::error(None, format!("[ApiRestServer] {err}"));
    }

    if let Some(message_data) = &mut message_data {
        message_data.mark_replied();
        if let Err(err) = message_data.db_update(ctx.dao().db()).await {
            return Response::error(&err, ctx.mode());
        }
    }

    Response::data(
        &StatusCode::OK,
        ReplyMessageResJson::new("Email sent successfully"),
    )
}

fn notification_mail(notify_email: &str, message_data: &MessageDao) -> MailPayload {
    let optional = |value: &Option<String>| value.as_deref().unwrap_or("-").to_owned();
    let subject = format!("New Contact Message from {}", message_data.name());
    let text = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nCompany: {}\nSubject: {}\n\n{}",
        message_data.name(),
        message_data.email(),
        optional(message_data.phone()),
        optional(message_data.company()),
        optional(message_data.subject()),
        message_data.message()
    );
    let body_html = format!(
        "<p>A new message arrived through the contact form.</p><p>{}</p>",
        template::escape(&text).replace('\n', "<br>")
    );

    MailPayload::new(
        notify_email,
        &subject,
        &text,
        Some(template::render("Team", &body_html)),
    )
}
