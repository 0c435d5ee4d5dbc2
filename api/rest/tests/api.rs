use std::{path::PathBuf, sync::Arc, time::Duration};

use actix_web::{
    http::{header, StatusCode},
    test, web, App,
};
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;
use vx_api_rest::{
    configure,
    context::{ApiRestCtx, ApiRestDaoCtx, ApiRestMailerCtx, ApiRestTokenCtx, ApiRestUploadCtx},
};
use vx_config::app::AppConfigMode;
use vx_dao::{admin::AdminDao, otp_code::OtpCodeDao, Db};
use vx_db_sqlite::db::SqliteDb;
use vx_mailer::{MailPayload, MailSender};
use vx_token_jwt::token::JwtToken;

const ADMIN_EMAIL: &str = "admin@vortextsoft.com";
const NOTIFY_EMAIL: &str = "team@vortextsoft.com";

struct Harness {
    ctx: web::Data<ApiRestCtx>,
    mail_rx: UnboundedReceiver<MailPayload>,
    upload_path: PathBuf,
    admin: AdminDao,
}

impl Harness {
    async fn new() -> Self {
        let db = Db::SqliteDb(
            SqliteDb::new(":memory:", &1, &Duration::from_secs(10))
                .await
                .unwrap(),
        );
        let admin = AdminDao::new(ADMIN_EMAIL, "admin");
        admin.db_insert_if_absent(&db).await.unwrap();

        let (mail_sender, mail_rx) = MailSender::channel();
        let upload_path = std::env::temp_dir().join(format!("vx-rest-{}", Uuid::now_v7()));

        let ctx = ApiRestCtx::new(
            &AppConfigMode::Development,
            ApiRestTokenCtx::new(JwtToken::new("test-secret", &Duration::from_secs(3600))),
            Some(ApiRestMailerCtx::new(
                mail_sender,
                &Some(NOTIFY_EMAIL.to_owned()),
            )),
            None,
            ApiRestDaoCtx::new(Arc::new(db)),
            ApiRestUploadCtx::new(
                upload_path.to_str().unwrap(),
                "/uploads",
                &(1024 * 1024),
            ),
            &Duration::from_secs(300),
        );

        Self {
            ctx: web::Data::new(ctx),
            mail_rx,
            upload_path,
            admin,
        }
    }

    fn token(&self, role: &str) -> String {
        self.ctx
            .token()
            .jwt()
            .encode(self.admin.id(), self.admin.email(), role)
            .unwrap()
    }

    fn bearer(&self) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token("admin")))
    }
}

macro_rules! app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data($harness.ctx.clone())
                .configure(configure),
        )
        .await
    };
}

fn jane_meeting() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "date": "2025-03-01",
        "time": "14:00",
        "topic": "Project Discussion"
    })
}

#[actix_web::test]
async fn meeting_confirmation_is_persisted_and_mailed() {
    let mut harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/meetings")
        .set_json(jane_meeting())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["isRead"], false);
    assert_eq!(created["meetingLink"], Value::Null);
    assert_eq!(created["cancellationReason"], Value::Null);
    let id = created["id"].as_str().unwrap().to_owned();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{id}/status"))
        .insert_header(harness.bearer())
        .set_json(json!({ "status": "confirmed", "meetingLink": "https://meet.example/abc" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let confirmed: Value = test::read_body_json(res).await;
    assert_eq!(confirmed["status"], "confirmed");
    assert_eq!(confirmed["isRead"], true);
    assert_eq!(confirmed["meetingLink"], "https://meet.example/abc");

    let mail = harness.mail_rx.try_recv().unwrap();
    assert_eq!(mail.to(), "jane@x.com");
    assert_eq!(mail.subject(), "Meeting Confirmation - Vortextsoft");
    assert!(mail.text().contains("https://meet.example/abc"));
    assert!(mail.html().as_deref().unwrap().contains("Jane Doe"));

    let req = test::TestRequest::get()
        .uri(&format!("/api/meetings/{id}"))
        .insert_header(harness.bearer())
        .to_request();
    let reread: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reread["meetingLink"], "https://meet.example/abc");
}

#[actix_web::test]
async fn meeting_transitions_are_validated() {
    let mut harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/meetings")
        .set_json(jane_meeting())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_owned();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{id}/status"))
        .insert_header(harness.bearer())
        .set_json(json!({ "status": "confirmed" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Meeting link is required to confirm a meeting");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{id}/status"))
        .insert_header(harness.bearer())
        .set_json(json!({ "status": "completed" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/meetings/{id}/status"))
        .insert_header(harness.bearer())
        .set_json(json!({ "status": "cancelled", "cancellationReason": "Double booked" }))
        .to_request();
    let cancelled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancellationReason"], "Double booked");

    let mail = harness.mail_rx.try_recv().unwrap();
    assert_eq!(mail.subject(), "Meeting Update - Vortextsoft");
    assert!(mail.text().contains("Double booked"));
    assert!(harness.mail_rx.try_recv().is_err());
}

#[actix_web::test]
async fn meeting_badge_counts_unread_pending() {
    let harness = Harness::new().await;
    let app = app!(harness);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/meetings")
            .set_json(jane_meeting())
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(created["id"].as_str().unwrap().to_owned());
    }

    for _ in 0..2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/api/meetings/{}/read", ids[0]))
            .insert_header(harness.bearer())
            .to_request();
        let read: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(read["isRead"], true);
        assert_eq!(read["status"], "pending");
    }

    let req = test::TestRequest::get()
        .uri("/api/meetings/unread-count")
        .insert_header(harness.bearer())
        .to_request();
    let count: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count, json!({ "count": 1 }));
}

#[actix_web::test]
async fn otp_login_issues_a_session_once() {
    let mut harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/auth/request-otp")
        .set_json(json!({ "email": ADMIN_EMAIL }))
        .to_request();
    let requested: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(requested["success"], true);
    let otp = requested["otp"].as_str().unwrap().to_owned();
    assert_eq!(otp.len(), 6);

    let mail = harness.mail_rx.recv().await.unwrap();
    assert_eq!(mail.to(), ADMIN_EMAIL);
    assert_eq!(mail.subject(), "VortextSoft Admin Login - OTP Code");
    assert!(mail.text().contains(&otp));
    assert_eq!(
        OtpCodeDao::db_count_by_email(harness.ctx.dao().db(), ADMIN_EMAIL)
            .await
            .unwrap(),
        1
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "email": ADMIN_EMAIL, "otp": otp }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let verified: Value = test::read_body_json(res).await;
    assert_eq!(verified["success"], true);
    assert_eq!(verified["user"]["email"], ADMIN_EMAIL);
    assert_eq!(verified["user"]["role"], "admin");
    assert!(verified["user"].get("password").is_none());
    let token = verified["token"].as_str().unwrap().to_owned();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/auth/verify-otp")
        .set_json(json!({ "email": ADMIN_EMAIL, "otp": otp }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid OTP");
}

#[actix_web::test]
async fn otp_request_does_not_reveal_unknown_emails() {
    let mut harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/auth/resend-otp")
        .set_json(json!({ "email": "stranger@x.com" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], true);
    assert!(body.get("otp").is_none());

    assert_eq!(
        OtpCodeDao::db_count_by_email(harness.ctx.dao().db(), "stranger@x.com")
            .await
            .unwrap(),
        0
    );
    assert!(harness.mail_rx.try_recv().is_err());
}

#[actix_web::test]
async fn admin_routes_reject_missing_and_foreign_tokens() {
    let harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::get().uri("/api/meetings").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "No token provided");

    let req = test::TestRequest::get()
        .uri("/api/meetings")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/contact")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", harness.token("editor")),
        ))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Access denied. Admin only.");
}

#[actix_web::test]
async fn unknown_ids_answer_item_not_found() {
    let harness = Harness::new().await;
    let app = app!(harness);

    for (method, uri) in [
        ("DELETE", format!("/api/meetings/{}", Uuid::now_v7())),
        ("PATCH", format!("/api/contact/{}/replied", Uuid::now_v7())),
        ("GET", format!("/api/services/{}", Uuid::now_v7())),
        ("GET", "/api/partners/not-a-uuid".to_owned()),
    ] {
        let req = match method {
            "DELETE" => test::TestRequest::delete(),
            "PATCH" => test::TestRequest::patch(),
            _ => test::TestRequest::get(),
        }
        .uri(&uri)
        .insert_header(harness.bearer())
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "error": "Item not found" }), "{method} {uri}");
    }
}

#[actix_web::test]
async fn services_support_full_crud() {
    let harness = Harness::new().await;
    let app = app!(harness);
    let service = json!({ "title": "Web Development", "description": "Fast sites" });

    let req = test::TestRequest::post()
        .uri("/api/services")
        .set_json(&service)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(harness.bearer())
        .set_json(json!({ "title": "No description" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Missing required fields: description");

    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(harness.bearer())
        .set_json(&service)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert!(created["createdAt"].is_string());

    let req = test::TestRequest::get()
        .uri(&format!("/api/services/{id}"))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["title"], "Web Development");
    assert_eq!(fetched["description"], "Fast sites");
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/services/{id}"))
        .insert_header(harness.bearer())
        .set_json(json!({ "description": "Faster sites", "id": "ignored" }))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["id"], id.as_str());
    assert_eq!(patched["title"], "Web Development");
    assert_eq!(patched["description"], "Faster sites");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/services/{id}"))
        .insert_header(harness.bearer())
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["message"], "Item deleted successfully");

    let req = test::TestRequest::get().uri("/api/services").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));
}

#[actix_web::test]
async fn hidden_blog_posts_are_admin_only() {
    let harness = Harness::new().await;
    let app = app!(harness);

    for (title, visible) in [("Launch", true), ("Draft", false)] {
        let req = test::TestRequest::post()
            .uri("/api/blog")
            .insert_header(harness.bearer())
            .set_json(json!({ "title": title, "isVisible": visible }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get().uri("/api/blog?all=true").to_request();
    let public: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["title"], "Launch");

    let req = test::TestRequest::get()
        .uri("/api/blog?all=true")
        .insert_header(harness.bearer())
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn applications_are_submitted_publicly_and_read_by_admins() {
    let harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/applications")
        .set_json(json!({ "applicantName": "Sam", "email": "sam@x.com", "position": "Engineer" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::get().uri("/api/applications").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/applications")
        .insert_header(harness.bearer())
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed[0]["applicantName"], "Sam");
}

#[actix_web::test]
async fn contact_reply_marks_message_replied() {
    let mut harness = Harness::new().await;
    let app = app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "Jane Doe", "email": "jane@x.com", "message": "Hi <there>" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["replied"], false);
    let id = created["id"].as_str().unwrap().to_owned();

    let notification = harness.mail_rx.try_recv().unwrap();
    assert_eq!(notification.to(), NOTIFY_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/contact/reply")
        .insert_header(harness.bearer())
        .set_json(json!({ "to": "jane@x.com", "subject": "Re: Hi" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Missing required fields: message");

    let req = test::TestRequest::post()
        .uri("/api/contact/reply")
        .insert_header(harness.bearer())
        .set_json(json!({
            "to": "jane@x.com",
            "subject": "Re: Hi",
            "message": "Thanks!\nWe will call you.",
            "messageId": id
        }))
        .to_request();
    let sent: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(sent, json!({ "success": true, "message": "Email sent successfully" }));

    let reply = harness.mail_rx.try_recv().unwrap();
    assert_eq!(reply.to(), "jane@x.com");
    let html = reply.html().as_deref().unwrap();
    assert!(html.contains("Valued Customer"));
    assert!(html.contains("Thanks!<br>We will call you."));

    let req = test::TestRequest::get()
        .uri("/api/contact/unread-count")
        .insert_header(harness.bearer())
        .to_request();
    let count: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count, json!({ "count": 0 }));
}

#[actix_web::test]
async fn uploads_are_checked_and_stored() {
    let harness = Harness::new().await;
    let app = app!(harness);
    let boundary = "vxboundary";
    let multipart = |field: &str, file_name: &str| {
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             data\r\n\
             --{boundary}--\r\n"
        )
    };
    let content_type = (
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={boundary}"),
    );

    let req = test::TestRequest::post()
        .uri("/api/upload/partner")
        .insert_header(harness.bearer())
        .insert_header(content_type.clone())
        .set_payload(multipart("logo", "logo.PNG"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let url = body["imageUrl"].as_str().unwrap();
    let stored_name = url.strip_prefix("/uploads/").unwrap();
    assert!(stored_name.ends_with(".png"));
    assert_eq!(
        tokio::fs::read(harness.upload_path.join(stored_name))
            .await
            .unwrap(),
        b"data"
    );

    let req = test::TestRequest::post()
        .uri("/api/upload/document")
        .insert_header(harness.bearer())
        .insert_header(content_type.clone())
        .set_payload(multipart("document", "setup.exe"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Only images, PDFs, and videos are allowed!");

    let req = test::TestRequest::post()
        .uri("/api/upload/document")
        .insert_header(harness.bearer())
        .insert_header(content_type)
        .set_payload(multipart("other", "cv.pdf"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "No file uploaded");

    tokio::fs::remove_dir_all(&harness.upload_path).await.unwrap();
}

async fn timed_out_db_ctx(mode: &AppConfigMode) -> web::Data<ApiRestCtx> {
    let db = SqliteDb::new(":memory:", &1, &Duration::ZERO).await.unwrap();
    web::Data::new(ApiRestCtx::new(
        mode,
        ApiRestTokenCtx::new(JwtToken::new("test-secret", &Duration::from_secs(3600))),
        None,
        None,
        ApiRestDaoCtx::new(Arc::new(Db::SqliteDb(db))),
        ApiRestUploadCtx::new("uploads", "/uploads", &(1024 * 1024)),
        &Duration::from_secs(300),
    ))
}

#[actix_web::test]
async fn storage_failures_are_opaque_outside_development() {
    for (mode, with_details) in [
        (AppConfigMode::Development, true),
        (AppConfigMode::Production, false),
    ] {
        let ctx = timed_out_db_ctx(&mode).await;
        let app = test::init_service(App::new().app_data(ctx).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/services").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Internal server error");
        if with_details {
            assert!(body["details"].as_str().unwrap().contains("timed out"));
        } else {
            assert!(body.get("details").is_none(), "{body}");
        }
    }
}

#[actix_web::test]
async fn malformed_contact_email_is_rejected() {
    let harness = Harness::new().await;
    let app = app!(harness);

    for (uri, body) in [
        (
            "/api/contact",
            json!({ "name": "Jane Doe", "email": "jane doe@x.com", "message": "Hello" }),
        ),
        ("/api/meetings", {
            let mut meeting = jane_meeting();
            meeting["email"] = json!("a@b@c.d");
            meeting
        }),
    ] {
        let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Invalid email address");
    }
}
