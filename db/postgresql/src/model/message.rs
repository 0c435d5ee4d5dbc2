use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct MessageModel {
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

impl MessageModel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        name: &str,
        email: &str,
        phone: &Option<String>,
        company: &Option<String>,
        subject: &Option<String>,
        message: &str,
        replied: &bool,
        replied_at: &Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.clone(),
            company: company.clone(),
            subject: subject.clone(),
            message: message.to_owned(),
            replied: *replied,
            replied_at: *replied_at,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

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

    pub fn replied(&self) -> &bool {
        &self.replied
    }

    pub fn replied_at(&self) -> &Option<DateTime<Utc>> {
        &self.replied_at
    }
}
