use anyhow::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{db::PostgresDb, model::admin::AdminModel};

const INSERT_IF_ABSENT: &str = "INSERT INTO \"admins\" (\"id\", \"created_at\", \"email\", \"role\") VALUES ($1, $2, $3, $4) ON CONFLICT (\"email\") DO NOTHING";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"email\", \"role\" FROM \"admins\" WHERE \"id\" = $1";
const SELECT_BY_EMAIL: &str = "SELECT \"id\", \"created_at\", \"email\", \"role\" FROM \"admins\" WHERE \"email\" = $1";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    vx_log::info(Some("🔧"), "[PostgreSQL] Setting up admins table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"admins\" (\"id\" uuid, \"created_at\" timestamptz, \"email\" text NOT NULL UNIQUE, \"role\" text NOT NULL, PRIMARY KEY (\"id\"))").await?;

    pool.prepare(INSERT_IF_ABSENT).await?;
    pool.prepare(SELECT).await?;
    pool.prepare(SELECT_BY_EMAIL).await?;

    Ok(())
}

impl PostgresDb {
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
