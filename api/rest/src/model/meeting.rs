use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vx_dao::meeting::MeetingDao;

#[derive(Deserialize)]
pub struct InsertOneMeetingReqJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    #[serde(default)]
    topic: String,
    reason: Option<String>,
}

impl InsertOneMeetingReqJson {
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
}

#[derive(Deserialize)]
pub struct MeetingReqPath {
    id: Uuid,
}

impl MeetingReqPath {
    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingStatusReqJson {
    #[serde(default)]
    status: String,
    meeting_link: Option<String>,
    cancellation_reason: Option<String>,
}

impl UpdateMeetingStatusReqJson {
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn meeting_link(&self) -> &Option<String> {
        &self.meeting_link
    }

    pub fn cancellation_reason(&self) -> &Option<String> {
        &self.cancellation_reason
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResJson {
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

impl From<&MeetingDao> for MeetingResJson {
    fn from(meeting: &MeetingDao) -> Self {
        Self {
            id: *meeting.id(),
            created_at: *meeting.created_at(),
            updated_at: *meeting.updated_at(),
            name: meeting.name().to_owned(),
            email: meeting.email().to_owned(),
            date: meeting.date().to_owned(),
            time: meeting.time().to_owned(),
            topic: meeting.topic().to_owned(),
            reason: meeting.reason().clone(),
            status: meeting.status().to_string(),
            is_read: *meeting.is_read(),
            meeting_link: meeting.meeting_link().clone(),
            cancellation_reason: meeting.cancellation_reason().clone(),
        }
    }
}
