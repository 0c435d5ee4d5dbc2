use std::time::Duration;

use serde_json::json;
use uuid::Uuid;
use vx_dao::{
    admin::AdminDao,
    meeting::{MeetingDao, MeetingStatus},
    message::MessageDao,
    otp_code::OtpCodeDao,
    resource::{ResourceCollection, ResourceDao},
    Db,
};
use vx_db_sqlite::db::SqliteDb;
use vx_error::Error;

async fn db() -> Db {
    Db::SqliteDb(
        SqliteDb::new(":memory:", &1, &Duration::from_secs(10))
            .await
            .unwrap(),
    )
}

fn jane() -> MeetingDao {
    MeetingDao::new(
        "Jane Doe",
        "jane@x.com",
        "2025-03-01",
        "14:00",
        "Project Discussion",
        &None,
    )
    .unwrap()
}

#[tokio::test]
async fn confirmed_meeting_persists_link() {
    let db = db().await;
    let meeting = jane();
    meeting.db_insert(&db).await.unwrap();

    let mut stored = MeetingDao::db_select(&db, meeting.id()).await.unwrap();
    assert_eq!(*stored.status(), MeetingStatus::Pending);
    assert!(!*stored.is_read());

    stored
        .transition(
            &MeetingStatus::Confirmed,
            &Some("https://meet.example/abc".to_owned()),
            &None,
        )
        .unwrap();
    stored.db_update(&db).await.unwrap();

    let reread = MeetingDao::db_select(&db, meeting.id()).await.unwrap();
    assert_eq!(*reread.status(), MeetingStatus::Confirmed);
    assert!(*reread.is_read());
    assert_eq!(
        reread.meeting_link().as_deref(),
        Some("https://meet.example/abc")
    );
}

#[tokio::test]
async fn deleted_meeting_is_gone() {
    let db = db().await;
    let meeting = jane();
    meeting.db_insert(&db).await.unwrap();

    MeetingDao::db_delete(&db, meeting.id()).await.unwrap();

    assert!(matches!(
        MeetingDao::db_select(&db, meeting.id()).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        MeetingDao::db_delete(&db, meeting.id()).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        MeetingDao::db_delete(&db, &Uuid::now_v7()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn unread_count_only_counts_pending() {
    let db = db().await;
    let first = jane();
    let mut second = jane();
    let mut third = jane();
    second.mark_read();
    third.cancel(&Some("Duplicate".to_owned())).unwrap();
    for meeting in [&first, &second, &third] {
        meeting.db_insert(&db).await.unwrap();
    }

    assert_eq!(MeetingDao::db_count_unread_pending(&db).await.unwrap(), 1);

    let listed = MeetingDao::db_select_many(&db).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|meeting| *meeting.id()).collect();
    assert_eq!(ids, vec![*third.id(), *second.id(), *first.id()]);
}

#[tokio::test]
async fn otp_is_consumed_once() {
    let db = db().await;
    let otp = OtpCodeDao::new("admin@vortextsoft.com", &Duration::from_secs(300)).unwrap();
    otp.db_insert(&db).await.unwrap();

    let verified = OtpCodeDao::verify(&db, "Admin@Vortextsoft.com", otp.code())
        .await
        .unwrap();
    assert!(*verified.used());

    assert!(matches!(
        OtpCodeDao::verify(&db, "admin@vortextsoft.com", otp.code()).await,
        Err(Error::InvalidCredentials(_))
    ));
}

#[tokio::test]
async fn expired_otp_is_distinct_from_invalid() {
    let db = db().await;
    let otp = OtpCodeDao::new("admin@vortextsoft.com", &Duration::ZERO).unwrap();
    otp.db_insert(&db).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(matches!(
        OtpCodeDao::verify(&db, "admin@vortextsoft.com", otp.code()).await,
        Err(Error::Expired(_))
    ));

    let wrong = if otp.code() == "000000" { "111111" } else { "000000" };
    assert!(matches!(
        OtpCodeDao::verify(&db, "admin@vortextsoft.com", wrong).await,
        Err(Error::InvalidCredentials(_))
    ));
    assert!(matches!(
        OtpCodeDao::verify(&db, "someone@else.com", otp.code()).await,
        Err(Error::InvalidCredentials(_))
    ));
}

#[tokio::test]
async fn admin_seed_is_idempotent() {
    let db = db().await;

    assert!(AdminDao::new("Admin@Vortextsoft.com", "admin")
        .db_insert_if_absent(&db)
        .await
        .unwrap());
    assert!(!AdminDao::new("admin@vortextsoft.com", "admin")
        .db_insert_if_absent(&db)
        .await
        .unwrap());

    let admin = AdminDao::db_select_by_email(&db, " ADMIN@vortextsoft.com ")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.email(), "admin@vortextsoft.com");
    assert_eq!(admin.role(), "admin");
    assert_eq!(
        AdminDao::db_select(&db, admin.id()).await.unwrap().email(),
        "admin@vortextsoft.com"
    );
    assert!(AdminDao::db_select_by_email(&db, "nobody@x.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn replied_message_is_counted_out() {
    let db = db().await;
    let mut message = MessageDao::new(
        "Jane Doe",
        "jane@x.com",
        &None,
        &Some("Acme".to_owned()),
        &None,
        "Hello",
    )
    .unwrap();
    message.db_insert(&db).await.unwrap();
    assert_eq!(MessageDao::db_count_unreplied(&db).await.unwrap(), 1);

    message.mark_replied();
    message.db_update(&db).await.unwrap();

    let stored = MessageDao::db_select(&db, message.id()).await.unwrap();
    assert!(*stored.replied());
    assert!(stored.replied_at().is_some());
    assert_eq!(stored.company().as_deref(), Some("Acme"));
    assert_eq!(MessageDao::db_count_unreplied(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn service_round_trips() {
    let db = db().await;
    let mut service = ResourceDao::new(
        &ResourceCollection::Services,
        json!({ "title": "Web Development", "description": "Fast sites", "features": ["SEO"] }),
    )
    .unwrap();
    service.db_insert(&db).await.unwrap();

    let stored = ResourceDao::db_select(&db, &ResourceCollection::Services, service.id())
        .await
        .unwrap();
    assert_eq!(stored.data(), service.data());
    assert_eq!(stored.created_at(), service.created_at());

    assert!(matches!(
        ResourceDao::db_select(&db, &ResourceCollection::Partners, service.id()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn team_is_listed_by_order_then_age() {
    let db = db().await;
    for (name, order) in [("Cara", json!(2)), ("Ana", json!(1)), ("Ben", json!(null)), ("Dan", json!(1))] {
        let mut member =
            ResourceDao::new(&ResourceCollection::TeamMembers, json!({ "name": name, "order": order }))
                .unwrap();
        member.db_insert(&db).await.unwrap();
    }

    let listed: Vec<String> = ResourceDao::db_select_many(&db, &ResourceCollection::TeamMembers)
        .await
        .unwrap()
        .iter()
        .map(|member| member.data()["name"].as_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(listed, vec!["Ana", "Dan", "Cara", "Ben"]);
}

#[tokio::test]
async fn reviews_get_next_position() {
    let db = db().await;
    let mut first =
        ResourceDao::new(&ResourceCollection::Reviews, json!({ "name": "A", "review": "Great" }))
            .unwrap();
    first.db_insert(&db).await.unwrap();
    let mut second =
        ResourceDao::new(&ResourceCollection::Reviews, json!({ "name": "B", "review": "Solid" }))
            .unwrap();
    second.db_insert(&db).await.unwrap();

    assert_eq!(first.data()["orderPosition"], json!(0));
    assert_eq!(second.data()["orderPosition"], json!(1));

    second.merge(json!({ "orderPosition": -1 })).unwrap();
    second.db_update(&db).await.unwrap();

    let listed = ResourceDao::db_select_many(&db, &ResourceCollection::Reviews)
        .await
        .unwrap();
    assert_eq!(listed[0].id(), second.id());
    assert_eq!(listed[1].id(), first.id());
}

#[tokio::test]
async fn resource_update_and_delete_report_missing_rows() {
    let db = db().await;
    let partner =
        ResourceDao::new(&ResourceCollection::Partners, json!({ "name": "Acme" })).unwrap();

    assert!(matches!(partner.db_update(&db).await, Err(Error::NotFound(_))));
    assert!(matches!(
        ResourceDao::db_delete(&db, &ResourceCollection::Partners, partner.id()).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn query_timeout_surfaces_as_storage_error() {
    let db = Db::SqliteDb(
        SqliteDb::new(":memory:", &1, &Duration::ZERO)
            .await
            .unwrap(),
    );

    match MeetingDao::db_select_many(&db).await {
        Err(Error::Storage(msg)) => assert_eq!(msg, "Query timed out after 0ms"),
        Err(err) => panic!("expected storage error, got {err:?}"),
        Ok(_) => panic!("expected storage error"),
    }
}
