use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

/// A content item whose fields live in a JSON document.
#[derive(FromRow)]
pub struct ResourceModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    data: String,
}

impl ResourceModel {
    pub fn new(id: &Uuid, created_at: &DateTime<Utc>, updated_at: &DateTime<Utc>, data: &str) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            data: data.to_owned(),
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

    pub fn data(&self) -> &str {
        &self.data
    }
}
