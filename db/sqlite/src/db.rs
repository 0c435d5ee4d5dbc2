use std::{future::Future, time::Duration};

use anyhow::{anyhow, Result};
use sqlx::{
    query::{Query, QueryAs},
    sqlite::{SqliteArguments, SqlitePoolOptions, SqliteQueryResult, SqliteRow},
    Pool, Sqlite,
};

use crate::query::{admin, meeting, message, otp_code, resource};

pub struct SqliteDb {
    pool: Pool<Sqlite>,
    query_timeout: Duration,
}

impl SqliteDb {
    /// Opens (creating if missing) the database at `path`. `:memory:` gives a
    /// private in-memory database, which the test suites rely on.
    pub async fn new(path: &str, max_connections: &u32, query_timeout: &Duration) -> Result<Self> {
        vx_log::info(Some("⚡"), "[SQLite] Initializing component");

        let url = format!("sqlite:{path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(*max_connections)
            .connect(&url)
            .await?;

        Self::init(&pool).await?;

        Ok(Self {
            pool,
            query_timeout: *query_timeout,
        })
    }

    pub async fn execute<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteQueryResult> {
        self.timed(query.execute(&self.pool)).await
    }

    pub async fn fetch_one<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<T> {
        self.timed(query.fetch_one(&self.pool)).await
    }

    pub async fn fetch_optional<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Option<T>> {
        self.timed(query.fetch_optional(&self.pool)).await
    }

    pub async fn fetch_one_row<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteRow> {
        self.timed(query.fetch_one(&self.pool)).await
    }

    pub async fn fetch_all<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Vec<T>> {
        self.timed(query.fetch_all(&self.pool)).await
    }

    async fn timed<T>(&self, fut: impl Future<Output = Result<T, sqlx::Error>>) -> Result<T> {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => Ok(res?),
            Err(_) => Err(anyhow!(
                "Query timed out after {}ms",
                self.query_timeout.as_millis()
            )),
        }
    }

    async fn init(pool: &Pool<Sqlite>) -> Result<()> {
        admin::init(pool).await?;
        otp_code::init(pool).await?;
        meeting::init(pool).await?;
        message::init(pool).await?;
        for table in resource::TABLES {
            resource::init(pool, table).await?;
        }
        Ok(())
    }
}
