use anyhow::Result;
use sqlx::{Executor, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{db::PostgresDb, model::message::MessageModel};

const INSERT: &str = "INSERT INTO \"messages\" (\"id\", \"created_at\", \"name\", \"email\", \"phone\", \"company\", \"subject\", \"message\", \"replied\", \"replied_at\") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"name\", \"email\", \"phone\", \"company\", \"subject\", \"message\", \"replied\", \"replied_at\" FROM \"messages\" WHERE \"id\" = $1";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"name\", \"email\", \"phone\", \"company\", \"subject\", \"message\", \"replied\", \"replied_at\" FROM \"messages\" ORDER BY \"created_at\" DESC, \"id\" DESC";
const UPDATE: &str = "UPDATE \"messages\" SET \"replied\" = $1, \"replied_at\" = $2 WHERE \"id\" = $3";
const DELETE: &str = "DELETE FROM \"messages\" WHERE \"id\" = $1";
const COUNT_BY_REPLIED: &str = "SELECT COUNT(1) FROM \"messages\" WHERE \"replied\" = $1";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    vx_log::info(Some("🔧"), "[PostgreSQL] Setting up messages table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"messages\" (\"id\" uuid, \"created_at\" timestamptz, \"name\" text NOT NULL, \"email\" text NOT NULL, \"phone\" text, \"company\" text, \"subject\" text, \"message\" text NOT NULL, \"replied\" boolean NOT NULL, \"replied_at\" timestamptz, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_MANY).await?;
    pool.prepare(UPDATE).await?;
    pool.prepare(DELETE).await?;
    pool.prepare(COUNT_BY_REPLIED).await?;

    Ok(())
}

impl PostgresDb {
    pub async fn insert_message(&self, value: &MessageModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.name())
                .bind(value.email())
                .bind(value.phone())
                .bind(value.company())
                .bind(value.subject())
                .bind(value.message())
                .bind(value.replied())
                .bind(value.replied_at()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_message(&self, id: &Uuid) -> Result<Option<MessageModel>> {
        self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await
    }

    pub async fn select_many_messages(&self) -> Result<Vec<MessageModel>> {
        self.fetch_all(sqlx::query_as(SELECT_MANY)).await
    }

    pub async fn update_message(&self, value: &MessageModel) -> Result<bool> {
        let res = self
            .execute(
                sqlx::query(UPDATE)
                    .bind(value.replied())
                    .bind(value.replied_at())
                    .bind(value.id()),
            )
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_message(&self, id: &Uuid) -> Result<bool> {
        let res = self.execute(sqlx::query(DELETE).bind(id)).await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_messages_by_replied(&self, replied: &bool) -> Result<i64> {
        Ok(self
            .fetch_one_row(sqlx::query(COUNT_BY_REPLIED).bind(replied))
            .await?
            .try_get(0)?)
    }
}
