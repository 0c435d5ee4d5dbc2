use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct MeetingModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    email: String,
    date: String,
    time: String,
    topic: String,
    reason: Option<String>,
    status: String,
    is_read: bool,
    meeting_link: Option<String>,
    cancellation_reason: Option<String>,
}

impl MeetingModel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        email: &str,
        date: &str,
        time: &str,
        topic: &str,
        reason: &Option<String>,
        status: &str,
        is_read: &bool,
        meeting_link: &Option<String>,
        cancellation_reason: &Option<String>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
            email: email.to_owned(),
            date: date.to_owned(),
            time: time.to_owned(),
            topic: topic.to_owned(),
            reason: reason.clone(),
            status: status.to_owned(),
            is_read: *is_read,
            meeting_link: meeting_link.clone(),
            cancellation_reason: cancellation_reason.clone(),
        }
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

    pub fn status(&self) -> &str {
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
}
