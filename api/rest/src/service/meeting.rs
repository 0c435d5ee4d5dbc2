use std::str::FromStr;

use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use vx_dao::meeting::{MeetingDao, MeetingStatus};
use vx_error::Error;
use vx_mailer::{template, MailPayload};

use crate::{
    context::ApiRestCtx,
    guard,
    model::{
        meeting::{InsertOneMeetingReqJson, MeetingReqPath, MeetingResJson, UpdateMeetingStatusReqJson},
        CountResJson, DeleteResJson, Response,
    },
    service::send_mail,
};

pub fn meeting_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/meetings", web::get().to(find_many))
        .route("/meetings", web::post().to(insert_one))
        .route("/meetings/unread-count", web::get().to(unread_count))
        .route("/meetings/{id}", web::get().to(find_one))
        .route("/meetings/{id}/status", web::patch().to(update_status))
        .route("/meetings/{id}/read", web::patch().to(mark_read))
        .route("/meetings/{id}", web::delete().to(delete_one));
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<InsertOneMeetingReqJson>,
) -> HttpResponse {
    let meeting_data = match MeetingDao::new(
        data.name(),
        data.email(),
        data.date(),
        data.time(),
        data.topic(),
        data.reason(),
    ) {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    if let Err(err) = meeting_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err, ctx.mode());
    }

    vx_log::info(
        None,
        format!(
            "[ApiRestServer] Meeting {} requested by {}",
            meeting_data.id(),
            meeting_data.email()
        ),
    );

    Response::data(&StatusCode::CREATED, MeetingResJson::from(&meeting_data))
}

async fn find_many(ctx: web::Data<ApiRestCtx>, auth: Option<BearerAuth>) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MeetingDao::db_select_many(ctx.dao().db()).await {
        Ok(data) => Response::data(
            &StatusCode::OK,
            data.iter().map(MeetingResJson::from).collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MeetingReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MeetingDao::db_select(ctx.dao().db(), path.id()).await {
        Ok(data) => Response::data(&StatusCode::OK, MeetingResJson::from(&data)),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn unread_count(ctx: web::Data<ApiRestCtx>, auth: Option<BearerAuth>) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MeetingDao::db_count_unread_pending(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::OK, CountResJson::new(&count)),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

/// Commits the transition, then queues the notification email. The email
/// never affects the response.
async fn update_status(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MeetingReqPath>,
    data: web::Json<UpdateMeetingStatusReqJson>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    let status = match MeetingStatus::from_str(data.status()) {
        Ok(status) => status,
        Err(_) => {
            return Response::error(
                &Error::Validation(format!("Invalid meeting status: {}", data.status())),
                ctx.mode(),
            )
        }
    };

    let mut meeting_data = match MeetingDao::db_select(ctx.dao().db(), path.id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    if let Err(err) =
        meeting_data.transition(&status, data.meeting_link(), data.cancellation_reason())
    {
        return Response::error(&err, ctx.mode());
    }

    if let Err(err) = meeting_data.db_update(ctx.dao().db()).await {
        return Response::error(&err, ctx.mode());
    }

    vx_log::info(
        None,
        format!(
            "[ApiRestServer] Meeting {} is now {}",
            meeting_data.id(),
            meeting_data.status()
        ),
    );

    if let Some(payload) = status_mail(&meeting_data) {
        send_mail(&ctx, payload);
    }

    Response::data(&StatusCode::OK, MeetingResJson::from(&meeting_data))
}

async fn mark_read(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MeetingReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    let mut meeting_data = match MeetingDao::db_select(ctx.dao().db(), path.id()).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    meeting_data.mark_read();

    match meeting_data.db_update(ctx.dao().db()).await {
        Ok(_) => Response::data(&StatusCode::OK, MeetingResJson::from(&meeting_data)),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    auth: Option<BearerAuth>,
    path: web::Path<MeetingReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match MeetingDao::db_delete(ctx.dao().db(), path.id()).await {
        Ok(_) => Response::data(
            &StatusCode::OK,
            DeleteResJson::new("Item deleted successfully"),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

fn status_mail(meeting_data: &MeetingDao) -> Option<MailPayload> {
    let details = format!(
        "<p><strong>Topic:</strong> {}<br><strong>Date:</strong> {}<br><strong>Time:</strong> {}</p>",
        template::escape(meeting_data.topic()),
        template::escape(meeting_data.date()),
        template::escape(meeting_data.time()),
    );

    match meeting_data.status() {
        MeetingStatus::Confirmed => {
            let link = meeting_data.meeting_link().as_deref().unwrap_or_default();
            Some(MailPayload::new(
                meeting_data.email(),
                "Meeting Confirmation - Vortextsoft",
                &format!(
                    "Your meeting about {} on {} at {} is confirmed. Join here: {link}",
                    meeting_data.topic(),
                    meeting_data.date(),
                    meeting_data.time()
                ),
                Some(template::render(
                    meeting_data.name(),
                    &format!(
                        "<p>Your meeting request has been confirmed.</p>{details}\
                         <p><a href=\"{link}\">Join the meeting</a></p>",
                        link = template::escape(link)
                    ),
                )),
            ))
        }
        MeetingStatus::Cancelled => {
            let reason = meeting_data
                .cancellation_reason()
                .as_deref()
                .unwrap_or_default();
            Some(MailPayload::new(
                meeting_data.email(),
                "Meeting Update - Vortextsoft",
                &format!("Your meeting request has been cancelled. Reason: {reason}"),
                Some(template::render(
                    meeting_data.name(),
                    &format!(
                        "<p>Your meeting request has been cancelled.</p>{details}\
                         <p><strong>Reason:</strong> {}</p>",
                        template::escape(reason)
                    ),
                )),
            ))
        }
        MeetingStatus::Pending | MeetingStatus::Completed => None,
    }
}
