use std::{future::Future, time::Duration};

use anyhow::{anyhow, Result};
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgQueryResult, PgRow},
    query::{Query, QueryAs},
    Pool, Postgres,
};

use crate::query::{admin, meeting, message, otp_code, resource};

pub struct PostgresDb {
    pool: Pool<Postgres>,
    query_timeout: Duration,
}

impl PostgresDb {
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        user: &str,
        password: &str,
        host: &str,
        port: &u16,
        db_name: &str,
        max_connections: &u32,
        query_timeout: &Duration,
    ) -> Result<Self> {
        vx_log::info(Some("⚡"), "[PostgreSQL] Initializing component");

        let url = format!("postgres://{user}:{password}@{host}:{port}/{db_name}");
        let pool = PgPoolOptions::new()
            .max_connections(*max_connections)
            .acquire_timeout(*query_timeout)
            .connect(&url)
            .await?;

        Self::init(&pool).await?;

        Ok(Self {
            pool,
            query_timeout: *query_timeout,
        })
    }

    pub async fn execute(&self, query: Query<'_, Postgres, PgArguments>) -> Result<PgQueryResult> {
        self.timed(query.execute(&self.pool)).await
    }

    pub async fn fetch_one<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
    ) -> Result<T> {
        self.timed(query.fetch_one(&self.pool)).await
    }

    pub async fn fetch_optional<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
    ) -> Result<Option<T>> {
        self.timed(query.fetch_optional(&self.pool)).await
    }

    pub async fn fetch_one_row(&self, query: Query<'_, Postgres, PgArguments>) -> Result<PgRow> {
        self.timed(query.fetch_one(&self.pool)).await
    }

    pub async fn fetch_all<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
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

    async fn init(pool: &Pool<Postgres>) -> Result<()> {
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
