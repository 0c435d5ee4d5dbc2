use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct OtpCodeModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    used: bool,
}

impl OtpCodeModel {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        email: &str,
        code: &str,
        expires_at: &DateTime<Utc>,
        used: &bool,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            email: email.to_owned(),
            code: code.to_owned(),
            expires_at: *expires_at,
            used: *used,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn expires_at(&self) -> &DateTime<Utc> {
        &self.expires_at
    }

    pub fn used(&self) -> &bool {
        &self.used
    }
}
