use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;
use vx_db_postgresql::model::otp_code::OtpCodeModel as OtpCodePostgresModel;
use vx_db_sqlite::model::otp_code::OtpCodeModel as OtpCodeSqliteModel;
use vx_error::{Error, Result};

use crate::{admin::normalize_email, util, Db};

/// A one-time login code. Rows are never deleted; expiry is purely a function
/// of `expires_at` and consumption flips `used` exactly once.
pub struct OtpCodeDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    used: bool,
}

impl OtpCodeDao {
    pub fn new(email: &str, ttl: &Duration) -> Result<Self> {
        let ttl = chrono::Duration::from_std(*ttl)
            .map_err(|err| Error::Internal(format!("Invalid OTP lifetime: {err}")))?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            created_at: now,
            email: normalize_email(email),
            code: rand::thread_rng().gen_range(100_000..=999_999).to_string(),
            expires_at: now + ttl,
            used: false,
        })
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

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn expires_at(&self) -> &DateTime<Utc> {
        &self.expires_at
    }

    pub fn used(&self) -> &bool {
        &self.used
    }

    pub fn verify_at(&self, now: &DateTime<Utc>) -> Result<()> {
        if self.used {
            return Err(invalid());
        }
        if *now > self.expires_at {
            return Err(Error::Expired("OTP has expired".to_owned()));
        }
        Ok(())
    }

    /// Checks `code` against the newest unused code issued to `email` and
    /// consumes it.
    pub async fn verify(db: &Db, email: &str, code: &str) -> Result<Self> {
        let mut otp = Self::db_select_latest_unused(db, email, code.trim()).await?;
        otp.verify_at(&Utc::now())?;
        otp.db_consume(db).await?;
        Ok(otp)
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_otp_code(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_otp_code(&self.to_sqlitedb_model()).await,
        }
        .map_err(util::storage)
    }

    pub async fn db_select_latest_unused(db: &Db, email: &str, code: &str) -> Result<Self> {
        let email = normalize_email(email);
        let otp = match db {
            Db::PostgresqlDb(db) => db
                .select_latest_unused_otp_code(&email, code)
                .await
                .map_err(util::storage)?
                .as_ref()
                .map(Self::from_postgresdb_model),
            Db::SqliteDb(db) => db
                .select_latest_unused_otp_code(&email, code)
                .await
                .map_err(util::storage)?
                .as_ref()
                .map(Self::from_sqlitedb_model),
        };
        otp.ok_or_else(invalid)
    }

    /// Fails if another request consumed the code first.
    pub async fn db_consume(&mut self, db: &Db) -> Result<()> {
        let consumed = match db {
            Db::PostgresqlDb(db) => db.consume_otp_code(&self.id).await,
            Db::SqliteDb(db) => db.consume_otp_code(&self.id).await,
        }
        .map_err(util::storage)?;
        if !consumed {
            return Err(invalid());
        }
        self.used = true;
        Ok(())
    }

    pub async fn db_count_by_email(db: &Db, email: &str) -> Result<i64> {
        let email = normalize_email(email);
        match db {
            Db::PostgresqlDb(db) => db.count_otp_codes_by_email(&email).await,
            Db::SqliteDb(db) => db.count_otp_codes_by_email(&email).await,
        }
        .map_err(util::storage)
    }

    fn from_postgresdb_model(model: &OtpCodePostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            email: model.email().to_owned(),
            code: model.code().to_owned(),
            expires_at: *model.expires_at(),
            used: *model.used(),
        }
    }

    fn to_postgresdb_model(&self) -> OtpCodePostgresModel {
        OtpCodePostgresModel::new(
            &self.id,
            &self.created_at,
            &self.email,
            &self.code,
            &self.expires_at,
            &self.used,
        )
    }

    fn from_sqlitedb_model(model: &OtpCodeSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            email: model.email().to_owned(),
            code: model.code().to_owned(),
            expires_at: *model.expires_at(),
            used: *model.used(),
        }
    }

    fn to_sqlitedb_model(&self) -> OtpCodeSqliteModel {
        OtpCodeSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.email,
            &self.code,
            &self.expires_at,
            &self.used,
        )
    }
}

fn invalid() -> Error {
    Error::InvalidCredentials("Invalid OTP".to_owned())
}
