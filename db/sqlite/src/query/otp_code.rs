use anyhow::Result;
use sqlx::{Executor, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::{db::SqliteDb, model::otp_code::OtpCodeModel};

const INSERT: &str = "INSERT INTO \"otp_codes\" (\"id\", \"created_at\", \"email\", \"code\", \"expires_at\", \"used\") VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_LATEST_UNUSED: &str = "SELECT \"id\", \"created_at\", \"email\", \"code\", \"expires_at\", \"used\" FROM \"otp_codes\" WHERE \"email\" = ? AND \"code\" = ? AND \"used\" = ? ORDER BY \"created_at\" DESC, \"id\" DESC LIMIT 1";
const CONSUME: &str = "UPDATE \"otp_codes\" SET \"used\" = ? WHERE \"id\" = ? AND \"used\" = ?";
const COUNT_BY_EMAIL: &str = "SELECT COUNT(1) FROM \"otp_codes\" WHERE \"email\" = ?";

pub async fn init(pool: &Pool<Sqlite>) -> Result<()> {
    vx_log::info(Some("🔧"), "[SQLite] Setting up otp_codes table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"otp_codes\" (\"id\" blob, \"created_at\" datetime, \"email\" text NOT NULL, \"code\" text NOT NULL, \"expires_at\" datetime NOT NULL, \"used\" boolean NOT NULL, PRIMARY KEY (\"id\"))").await?;
    pool.execute("CREATE INDEX IF NOT EXISTS \"otp_codes_email\" ON \"otp_codes\" (\"email\")")
        .await?;

    pool.prepare(INSERT).await?;
    pool.prepare(SELECT_LATEST_UNUSED).await?;
    pool.prepare(CONSUME).await?;
    pool.prepare(COUNT_BY_EMAIL).await?;

    Ok(())
}

impl SqliteDb {
    pub async fn insert_otp_code(&self, value: &OtpCodeModel) -> Result<()> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.email())
                .bind(value.code())
                .bind(value.expires_at())
                .bind(value.used()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_latest_unused_otp_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpCodeModel>> {
        self.fetch_optional(
            sqlx::query_as(SELECT_LATEST_UNUSED)
                .bind(email)
                .bind(code)
                .bind(false),
        )
        .await
    }

    /// Flips `used` only if it is still unset, so a code is consumed at most once.
    pub async fn consume_otp_code(&self, id: &Uuid) -> Result<bool> {
        let res = self
            .execute(sqlx::query(CONSUME).bind(true).bind(id).bind(false))
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn count_otp_codes_by_email(&self, email: &str) -> Result<i64> {
        Ok(self
            .fetch_one_row(sqlx::query(COUNT_BY_EMAIL).bind(email))
            .await?
            .try_get(0)?)
    }
}
