use std::time::Duration;

use serde::Deserialize;

/// Exactly one backend is used; `sqlite` wins when both are present.
#[derive(Deserialize)]
pub struct DbConfig {
    sqlite: Option<DbSqliteConfig>,
    postgres: Option<DbPostgresConfig>,
    #[serde(
        default = "default_query_timeout",
        deserialize_with = "duration_str::deserialize_duration"
    )]
    query_timeout: Duration,
}

impl DbConfig {
    pub fn sqlite(&self) -> &Option<DbSqliteConfig> {
        &self.sqlite
    }

    pub fn postgres(&self) -> &Option<DbPostgresConfig> {
        &self.postgres
    }

    pub fn query_timeout(&self) -> &Duration {
        &self.query_timeout
    }
}

#[derive(Deserialize)]
pub struct DbSqliteConfig {
    path: String,
    #[serde(default = "default_sqlite_max_connections")]
    max_connections: u32,
}

impl DbSqliteConfig {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn max_connections(&self) -> &u32 {
        &self.max_connections
    }
}

#[derive(Deserialize)]
pub struct DbPostgresConfig {
    user: String,
    password: String,
    host: String,
    #[serde(default = "default_postgres_port")]
    port: u16,
    db_name: String,
    #[serde(default = "default_postgres_max_connections")]
    max_connections: u32,
}

impl DbPostgresConfig {
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &u16 {
        &self.port
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    pub fn max_connections(&self) -> &u32 {
        &self.max_connections
    }
}

fn default_query_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_sqlite_max_connections() -> u32 {
    4
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_max_connections() -> u32 {
    10
}
