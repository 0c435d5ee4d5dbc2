use anyhow::Result;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::admin::AdminModel};

const INSERT_IF_ABSENT: &str = "INSERT INTO \"admins\" (\"id\", \"created_at\", \"email\", \"role\") VALUES (?, ?, ?, ?) ON CONFLICT (\"email\") DO NOTHING";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"email\", \"role\" FROM \"admins\" WHERE \"id\" = ?";
const SELECT_BY_EMAIL: &str = "SELECT \"id\", \"created_at\", \"email\", \"role\" FROM \"admins\" WHERE \"email\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    vx_log::info(Some("🔧"), "[SQLite] Setting up admins table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"admins\" (\"id\" blob, \"created_at\" datetime, \"email\" text NOT NULL UNIQUE, \"role\" text NOT NULL, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(INSERT_IF_ABSENT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_BY_EMAIL).await?;

    Ok(())
}

impl SqliteDb {
    /// Returns whether a row was written; an existing email is left untouched.
    pub async fn insert_admin_if_absent(&self, value: &AdminModel) -> Result<bool> {
        let res = self
            .execute(
                sqlx::query(INSERT_IF_ABSENT)
                    .bind(value.id())
                    .bind(value.created_at())
                    .bind(value.email())
                    .bind(value.role()),
            )
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn select_admin(&self, id: &Uuid) -> Result<Option<AdminModel>> {
        self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await
    }

    pub async fn select_admin_by_email(&self, email: &str) -> Result<Option<AdminModel>> {
        self.fetch_optional(sqlx::query_as(SELECT_BY_EMAIL).bind(email))
            .await
    }
}
