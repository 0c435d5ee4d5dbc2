use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;
use vx_db_postgresql::model::meeting::MeetingModel as MeetingPostgresModel;
use vx_db_sqlite::model::meeting::MeetingModel as MeetingSqliteModel;
use vx_error::{Error, Result};

use crate::{util, Db};

pub const MAX_REASON_WORDS: usize = 200;

#[derive(AsRefStr, Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum MeetingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl MeetingStatus {
    /// `pending -> {confirmed, cancelled}`, `confirmed -> {cancelled, completed}`.
    pub fn can_become(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

pub struct MeetingDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    email: String,
    date: String,
    time: String,
    topic: String,
    reason: Option<String>,
    status: MeetingStatus,
    is_read: bool,
    meeting_link: Option<String>,
    cancellation_reason: Option<String>,
}

impl MeetingDao {
    pub fn new(
        name: &str,
        email: &str,
        date: &str,
        time: &str,
        topic: &str,
        reason: &Option<String>,
    ) -> Result<Self> {
        util::require(&[
            ("name", name),
            ("email", email),
            ("date", date),
            ("time", time),
            ("topic", topic),
        ])?;
        let email = email.trim();
        util::check_email(email)?;
        let date = parse_date(date)?;
        let time = parse_time(time)?;
        let reason = util::non_blank(reason);
        if let Some(reason) = &reason {
            if word_count(reason) > MAX_REASON_WORDS {
                return Err(Error::Validation(format!(
                    "Reason must be {MAX_REASON_WORDS} words or fewer"
                )));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.trim().to_owned(),
            email: email.to_owned(),
            date,
            time,
            topic: topic.trim().to_owned(),
            reason,
            status: MeetingStatus::Pending,
            is_read: false,
            meeting_link: None,
            cancellation_reason: None,
        })
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn reason(&self) -> &Option<String> {
        &self.reason
    }

    pub fn status(&self) -> &MeetingStatus {
        &self.status
    }

    pub fn is_read(&self) -> &bool {
        &self.is_read
    }

    pub fn meeting_link(&self) -> &Option<String> {
        &self.meeting_link
    }

    pub fn cancellation_reason(&self) -> &Option<String> {
        &self.cancellation_reason
    }

    pub fn transition(
        &mut self,
        status: &MeetingStatus,
        meeting_link: &Option<String>,
        cancellation_reason: &Option<String>,
    ) -> Result<()> {
        match status {
            MeetingStatus::Confirmed => self.confirm(meeting_link),
            MeetingStatus::Cancelled => self.cancel(cancellation_reason),
            MeetingStatus::Completed => self.complete(),
            MeetingStatus::Pending => Err(self.illegal(status)),
        }
    }

    pub fn confirm(&mut self, meeting_link: &Option<String>) -> Result<()> {
        let meeting_link = util::non_blank(meeting_link).ok_or_else(|| {
            Error::Validation("Meeting link is required to confirm a meeting".to_owned())
        })?;
        self.advance(&MeetingStatus::Confirmed)?;
        self.meeting_link = Some(meeting_link);
        self.is_read = true;
        Ok(())
    }

    pub fn cancel(&mut self, cancellation_reason: &Option<String>) -> Result<()> {
        let cancellation_reason = util::non_blank(cancellation_reason).ok_or_else(|| {
            Error::Validation("Cancellation reason is required to cancel a meeting".to_owned())
        })?;
        self.advance(&MeetingStatus::Cancelled)?;
        self.cancellation_reason = Some(cancellation_reason);
        self.is_read = true;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<()> {
        self.advance(&MeetingStatus::Completed)
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
        self.updated_at = Utc::now();
    }

    fn advance(&mut self, next: &MeetingStatus) -> Result<()> {
        if !self.status.can_become(next) {
            return Err(self.illegal(next));
        }
        self.status = *next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn illegal(&self, next: &MeetingStatus) -> Error {
        Error::Validation(format!(
            "Cannot change meeting status from {} to {next}",
            self.status
        ))
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_meeting(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_meeting(&self.to_sqlitedb_model()).await,
        }
        .map_err(util::storage)
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        match db {
            Db::PostgresqlDb(db) => match db.select_meeting(id).await.map_err(util::storage)? {
                Some(model) => Self::from_postgresdb_model(&model),
                None => Err(Error::item_not_found()),
            },
            Db::SqliteDb(db) => match db.select_meeting(id).await.map_err(util::storage)? {
                Some(model) => Self::from_sqlitedb_model(&model),
                None => Err(Error::item_not_found()),
            },
        }
    }

    /// Newest first.
    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => {
                let meetings = db.select_many_meetings().await.map_err(util::storage)?;
                let mut meetings_data = Vec::with_capacity(meetings.len());
                for meeting in &meetings {
                    meetings_data.push(Self::from_postgresdb_model(meeting)?);
                }
                Ok(meetings_data)
            }
            Db::SqliteDb(db) => {
                let meetings = db.select_many_meetings().await.map_err(util::storage)?;
                let mut meetings_data = Vec::with_capacity(meetings.len());
                for meeting in &meetings {
                    meetings_data.push(Self::from_sqlitedb_model(meeting)?);
                }
                Ok(meetings_data)
            }
        }
    }

    pub async fn db_update(&self, db: &Db) -> Result<()> {
        util::affected(
            match db {
                Db::PostgresqlDb(db) => db.update_meeting(&self.to_postgresdb_model()).await,
                Db::SqliteDb(db) => db.update_meeting(&self.to_sqlitedb_model()).await,
            }
            .map_err(util::storage)?,
        )
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        util::affected(
            match db {
                Db::PostgresqlDb(db) => db.delete_meeting(id).await,
                Db::SqliteDb(db) => db.delete_meeting(id).await,
            }
            .map_err(util::storage)?,
        )
    }

    /// Badge count: meetings still pending that no admin has opened.
    pub async fn db_count_unread_pending(db: &Db) -> Result<i64> {
        let status = MeetingStatus::Pending;
        match db {
            Db::PostgresqlDb(db) => {
                db.count_meetings_by_read_and_status(&false, status.as_ref())
                    .await
            }
            Db::SqliteDb(db) => {
                db.count_meetings_by_read_and_status(&false, status.as_ref())
                    .await
            }
        }
        .map_err(util::storage)
    }

    fn from_postgresdb_model(model: &MeetingPostgresModel) -> Result<Self> {
        Ok(Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            email: model.email().to_owned(),
            date: model.date().to_owned(),
            time: model.time().to_owned(),
            topic: model.topic().to_owned(),
            reason: model.reason().clone(),
            status: parse_status(model.status())?,
            is_read: *model.is_read(),
            meeting_link: model.meeting_link().clone(),
            cancellation_reason: model.cancellation_reason().clone(),
        })
    }

    fn to_postgresdb_model(&self) -> MeetingPostgresModel {
        MeetingPostgresModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.email,
            &self.date,
            &self.time,
            &self.topic,
            &self.reason,
            self.status.as_ref(),
            &self.is_read,
            &self.meeting_link,
            &self.cancellation_reason,
        )
    }

    fn from_sqlitedb_model(model: &MeetingSqliteModel) -> Result<Self> {
        Ok(Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            email: model.email().to_owned(),
            date: model.date().to_owned(),
            time: model.time().to_owned(),
            topic: model.topic().to_owned(),
            reason: model.reason().clone(),
            status: parse_status(model.status())?,
            is_read: *model.is_read(),
            meeting_link: model.meeting_link().clone(),
            cancellation_reason: model.cancellation_reason().clone(),
        })
    }

    fn to_sqlitedb_model(&self) -> MeetingSqliteModel {
        MeetingSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.email,
            &self.date,
            &self.time,
            &self.topic,
            &self.reason,
            self.status.as_ref(),
            &self.is_read,
            &self.meeting_link,
            &self.cancellation_reason,
        )
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn parse_status(status: &str) -> Result<MeetingStatus> {
    MeetingStatus::from_str(status)
        .map_err(|_| Error::Storage(format!("Unknown meeting status '{status}' in storage")))
}

fn parse_date(date: &str) -> Result<String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| Error::Validation("Invalid date, expected YYYY-MM-DD".to_owned()))
}

fn parse_time(time: &str) -> Result<String> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| Error::Validation("Invalid time, expected HH:MM".to_owned()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use vx_error::Error;

    use super::{word_count, MeetingDao, MeetingStatus};

    fn meeting() -> MeetingDao {
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

    fn link() -> Option<String> {
        Some("https://meet.example/abc".to_owned())
    }

    #[test]
    fn new_meeting_is_pending_and_unread() {
        let meeting = meeting();
        assert_eq!(*meeting.status(), MeetingStatus::Pending);
        assert!(!*meeting.is_read());
        assert!(meeting.meeting_link().is_none());
        assert!(meeting.cancellation_reason().is_none());
        assert_eq!(meeting.date(), "2025-03-01");
        assert_eq!(meeting.time(), "14:00");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = MeetingDao::new("", "jane@x.com", "2025-03-01", "", "Topic", &None)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Missing required fields: name, time");

        assert!(matches!(
            MeetingDao::new("Jane", "jane@x.com", "01/03/2025", "14:00", "Topic", &None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            MeetingDao::new("Jane", "jane@x.com", "2025-03-01", "2pm", "Topic", &None),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn reason_is_capped_at_two_hundred_words() {
        let at_limit = Some(vec!["word"; 200].join(" "));
        let over_limit = Some(vec!["word"; 201].join(" "));

        assert!(MeetingDao::new("Jane", "jane@x.com", "2025-03-01", "14:00", "T", &at_limit).is_ok());
        assert!(matches!(
            MeetingDao::new("Jane", "jane@x.com", "2025-03-01", "14:00", "T", &over_limit),
            Err(Error::Validation(_))
        ));
        assert_eq!(word_count("  spread   over\nlines\t "), 3);
    }

    #[test]
    fn confirm_needs_a_link() {
        let mut meeting = meeting();
        assert!(matches!(meeting.confirm(&None), Err(Error::Validation(_))));
        assert!(matches!(
            meeting.confirm(&Some("   ".to_owned())),
            Err(Error::Validation(_))
        ));
        assert_eq!(*meeting.status(), MeetingStatus::Pending);

        meeting.confirm(&link()).unwrap();
        assert_eq!(*meeting.status(), MeetingStatus::Confirmed);
        assert!(*meeting.is_read());
        assert_eq!(meeting.meeting_link(), &link());
    }

    #[test]
    fn cancel_needs_a_reason() {
        let mut meeting = meeting();
        assert!(matches!(meeting.cancel(&None), Err(Error::Validation(_))));

        meeting.cancel(&Some("Schedule conflict".to_owned())).unwrap();
        assert_eq!(*meeting.status(), MeetingStatus::Cancelled);
        assert!(*meeting.is_read());
        assert_eq!(
            meeting.cancellation_reason().as_deref(),
            Some("Schedule conflict")
        );
    }

    #[test]
    fn confirmed_meeting_can_complete_or_cancel() {
        let mut meeting = meeting();
        assert!(matches!(meeting.complete(), Err(Error::Validation(_))));

        meeting.confirm(&link()).unwrap();
        meeting.complete().unwrap();
        assert_eq!(*meeting.status(), MeetingStatus::Completed);
        assert_eq!(meeting.meeting_link(), &link());

        let mut other = self::meeting();
        other.confirm(&link()).unwrap();
        other.cancel(&Some("Client withdrew".to_owned())).unwrap();
        assert_eq!(*other.status(), MeetingStatus::Cancelled);
    }

    #[test]
    fn terminal_states_do_not_move() {
        let mut meeting = meeting();
        meeting.cancel(&Some("No longer needed".to_owned())).unwrap();

        let err = meeting.confirm(&link()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot change meeting status from cancelled to confirmed"
        );
        assert!(meeting
            .transition(&MeetingStatus::Pending, &None, &None)
            .is_err());
        assert!(meeting.meeting_link().is_none());
    }

    #[test]
    fn mark_read_is_idempotent_and_keeps_status() {
        let mut meeting = meeting();
        meeting.mark_read();
        meeting.mark_read();
        assert!(*meeting.is_read());
        assert_eq!(*meeting.status(), MeetingStatus::Pending);
    }

    #[test]
    fn status_round_trips_through_lowercase_names() {
        assert_eq!(MeetingStatus::Confirmed.as_ref(), "confirmed");
        assert_eq!(
            MeetingStatus::from_str("completed").unwrap(),
            MeetingStatus::Completed
        );
        assert!(MeetingStatus::from_str("archived").is_err());
    }
}
