use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct AdminModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    email: String,
    role: String,
}

impl AdminModel {
    pub fn new(id: &Uuid, created_at: &DateTime<Utc>, email: &str, role: &str) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            email: email.to_owned(),
            role: role.to_owned(),
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

    pub fn role(&self) -> &str {
        &self.role
    }
}
