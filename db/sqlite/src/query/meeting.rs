use anyhow::Result;
use sqlx::{Executor, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::meeting::MeetingModel};

const INSERT: &str = "INSERT INTO \"meetings\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"email\", \"date\", \"time\", \"topic\", \"reason\", \"status\", \"is_read\", \"meeting_link\", \"cancellation_reason\") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"email\", \"date\", \"time\", \"topic\", \"reason\", \"status\", \"is_read\", \"meeting_link\", \"cancellation_reason\" FROM \"meetings\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"email\", \"date\", \"time\", \"topic\", \"reason\", \"status\", \"is_read\", \"meeting_link\", \"cancellation_reason\" FROM \"meetings\" ORDER BY \"created_at\" DESC, \"id\" DESC";
const UPDATE: &str = "UPDATE \"meetings\" SET \"updated_at\" = ?, \"name\" = ?, \"email\" = ?, \"date\" = ?, \"time\" = ?, \"topic\" = ?, \"reason\" = ?, \"status\" = ?, \"is_read\" = ?, \"meeting_link\" = ?, \"cancellation_reason\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"meetings\" WHERE \"id\" = ?";
const COUNT_BY_READ_AND_STATUS: &str =
    "SELECT COUNT(1) FROM \"meetings\" WHERE \"is_read\" = ? AND \"status\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    vx_log::info(Some("🔧"), "[SQLite] Setting up meetings table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"meetings\" (\"id\" blob, \"created_at\" datetime, \"updated_at\" datetime, \"name\" text NOT NULL, \"email\" text NOT NULL, \"date\" text NOT NULL, \"time\" text NOT NULL, \"topic\" text NOT NULL, \"reason\" text, \"status\" text NOT NULL, \"is_read\" boolean NOT NULL, \"meeting_link\" text, \"cancellation_reason\" text, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(UPDATE).await?;
    pool.prepare(DELETE).await?;
    pool.prepare(COUNT_BY_READ_AND_STATUS).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_meeting(&self, value: &MeetingModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.email())
                .bind(value.date())
                .bind(value.time())
                .bind(value.topic())
                .bind(value.reason())
                .bind(value.status())
                .bind(value.is_read())
                .bind(value.meeting_link())
                .bind(value.cancellation_reason()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_meeting(&self, id: &Uuid) -> Result<Option<MeetingModel>> {
        self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await
    }

    pub async fn select_many_meetings(&self) -> Result<Vec<MeetingModel>> {
        self.fetch_all(sqlx::query_as(SELECT_MANY)).await
    }

    pub async fn update_meeting(&self, value: &MeetingModel) -> Result<bool> {
        let res = self
            .execute(
                sqlx::query(UPDATE)
                    .bind(value.updated_at())
                    .bind(value.name())
                    .bind(value.email())
                    .bind(value.date())
                    .bind(value.time())
                    .bind(value.topic())
                    .bind(value.reason())
                    .bind(value.status())
                    .bind(value.is_read())
                    .bind(value.meeting_link())
                    .bind(value.cancellation_reason())
                    .bind(value.id()),
            )
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_meeting(&self, id: &Uuid) -> Result<bool> {
        let res = self.execute(sqlx::query(DELETE).bind(id)).await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_meetings_by_read_and_status(
        &self,
        is_read: &bool,
        status: &str,
    ) -> Result<i64> {
        Ok(self
            .fetch_one_row(
                sqlx::query(COUNT_BY_READ_AND_STATUS)
                    .bind(is_read)
                    .bind(status),
            )
            .await?
            .try_get(0)?)
    }
}
