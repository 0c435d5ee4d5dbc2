use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vx_dao::message::MessageDao;

#[derive(Deserialize)]
pub struct InsertOneMessageReqJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    phone: Option<String>,
    company: Option<String>,
    subject: Option<String>,
    #[serde(default)]
    message: String,
}

impl InsertOneMessageReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &Option<String> {
        &self.phone
    }

    pub fn company(&self) -> &Option<String> {
        &self.company
    }

    pub fn subject(&self) -> &Option<String> {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Deserialize)]
pub struct MessageReqPath {
    id: Uuid,
}

impl MessageReqPath {
    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMessageReqJson {
    #[serde(default)]
    to: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    message: String,
    recipient_name: Option<String>,
    message_id: Option<Uuid>,
}

impl ReplyMessageReqJson {
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn recipient_name(&self) -> &Option<String> {
        &self.recipient_name
    }

    pub fn message_id(&self) -> &Option<Uuid> {
        &self.message_id
    }
}

#[derive(Serialize)]
pub struct ReplyMessageResJson {
    success: bool,
    message: String,
}

impl ReplyMessageResJson {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    subject: Option<String>,
    message: String,
    replied: bool,
    replied_at: Option<DateTime<Utc>>,
}

impl From<&MessageDao> for MessageResJson {
    fn from(message: &MessageDao) -> Self {
        Self {
            id: *message.id(),
            created_at: *message.created_at(),
            name: message.name().to_owned(),
            email: message.email().to_owned(),
            phone: message.phone().clone(),
            company: message.company().clone(),
            subject: message.subject().clone(),
            message: message.message().to_owned(),
            replied: *message.replied(),
            replied_at: *message.replied_at(),
        }
    }
}
