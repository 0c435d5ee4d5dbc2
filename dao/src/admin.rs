use chrono::{DateTime, Utc};
use uuid::Uuid;
use vx_db_postgresql::model::admin::AdminModel as AdminPostgresModel;
use vx_db_sqlite::model::admin::AdminModel as AdminSqliteModel;
use vx_error::Result;

use crate::{util, Db};

pub const DEFAULT_ROLE: &str = "admin";

pub struct AdminDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    email: String,
    role: String,
}

impl AdminDao {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            email: normalize_email(email),
            role: role.to_owned(),
        }
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

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Writes the admin unless the email is already registered. Returns whether a row was added.
    pub async fn db_insert_if_absent(&self, db: &Db) -> Result<bool> {
        match db {
            Db::PostgresqlDb(db) => db.insert_admin_if_absent(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_admin_if_absent(&self.to_sqlitedb_model()).await,
        }
        .map_err(util::storage)
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        match db {
            Db::PostgresqlDb(db) => util::found(
                db.select_admin(id)
                    .await
                    .map_err(util::storage)?
                    .as_ref()
                    .map(Self::from_postgresdb_model),
            ),
            Db::SqliteDb(db) => util::found(
                db.select_admin(id)
                    .await
                    .map_err(util::storage)?
                    .as_ref()
                    .map(Self::from_sqlitedb_model),
            ),
        }
    }

    pub async fn db_select_by_email(db: &Db, email: &str) -> Result<Option<Self>> {
        let email = normalize_email(email);
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_admin_by_email(&email)
                .await
                .map_err(util::storage)?
                .as_ref()
                .map(Self::from_postgresdb_model)),
            Db::SqliteDb(db) => Ok(db
                .select_admin_by_email(&email)
                .await
                .map_err(util::storage)?
                .as_ref()
                .map(Self::from_sqlitedb_model)),
        }
    }

    fn from_postgresdb_model(model: &AdminPostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            email: model.email().to_owned(),
            role: model.role().to_owned(),
        }
    }

    fn to_postgresdb_model(&self) -> AdminPostgresModel {
        AdminPostgresModel::new(&self.id, &self.created_at, &self.email, &self.role)
    }

    fn from_sqlitedb_model(model: &AdminSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            email: model.email().to_owned(),
            role: model.role().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> AdminSqliteModel {
        AdminSqliteModel::new(&self.id, &self.created_at, &self.email, &self.role)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
