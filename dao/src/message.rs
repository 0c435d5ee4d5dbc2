use chrono::{DateTime, Utc};
use uuid::Uuid;
use vx_db_postgresql::model::message::MessageModel as MessagePostgresModel;
use vx_db_sqlite::model::message::MessageModel as MessageSqliteModel;
use vx_error::Result;

use crate::{util, Db};

pub struct MessageDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    subject: Option<String>,
    message: String,
    replied: bool,
    replied_at: Option<DateTime<Utc>>,
}

impl MessageDao {
    pub fn new(
        name: &str,
        email: &str,
        phone: &Option<String>,
        company: &Option<String>,
        subject: &Option<String>,
        message: &str,
    ) -> Result<Self> {
        util::require(&[("name", name), ("email", email), ("message", message)])?;
        let email = email.trim();
        util::check_email(email)?;

        Ok(Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            name: name.trim().to_owned(),
            email: email.to_owned(),
            phone: util::non_blank(phone),
            company: util::non_blank(company),
            subject: util::non_blank(subject),
            message: message.trim().to_owned(),
            replied: false,
            replied_at: None,
        })
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &Option<String> {
        &self.phone
    }

    pub fn company(&self) -> &Option<String> {
        &self.company
    }

    pub fn subject(&self) -> &Option<String> {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn replied(&self) -> &bool {
        &self.replied
    }

    pub fn replied_at(&self) -> &Option<DateTime<Utc>> {
        &self.replied_at
    }

    /// Keeps the time of the first reply when called again.
    pub fn mark_replied(&mut self) {
        if !self.replied {
            self.replied = true;
            self.replied_at = Some(Utc::now());
        }
    }

    pub async fn db_insert(&self, db: &Db) -> Result<()> {
        match db {
            Db::PostgresqlDb(db) => db.insert_message(&self.to_postgresdb_model()).await,
            Db::SqliteDb(db) => db.insert_message(&self.to_sqlitedb_model()).await,
        }
        .map_err(util::storage)
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self> {
        match db {
            Db::PostgresqlDb(db) => util::found(
                db.select_message(id)
                    .await
                    .map_err(util::storage)?
                    .as_ref()
                    .map(Self::from_postgresdb_model),
            ),
            Db::SqliteDb(db) => util::found(
                db.select_message(id)
                    .await
                    .map_err(util::storage)?
                    .as_ref()
                    .map(Self::from_sqlitedb_model),
            ),
        }
    }

    /// Newest first.
    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::PostgresqlDb(db) => Ok(db
                .select_many_messages()
                .await
                .map_err(util::storage)?
                .iter()
                .map(Self::from_postgresdb_model)
                .collect()),
            Db::SqliteDb(db) => Ok(db
                .select_many_messages()
                .await
                .map_err(util::storage)?
                .iter()
                .map(Self::from_sqlitedb_model)
                .collect()),
        }
    }

    pub async fn db_update(&self, db: &Db) -> Result<()> {
        util::affected(
            match db {
                Db::PostgresqlDb(db) => db.update_message(&self.to_postgresdb_model()).await,
                Db::SqliteDb(db) => db.update_message(&self.to_sqlitedb_model()).await,
            }
            .map_err(util::storage)?,
        )
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<()> {
        util::affected(
            match db {
                Db::PostgresqlDb(db) => db.delete_message(id).await,
                Db::SqliteDb(db) => db.delete_message(id).await,
            }
            .map_err(util::storage)?,
        )
    }

    pub async fn db_count_unreplied(db: &Db) -> Result<i64> {
        match db {
            Db::PostgresqlDb(db) => db.count_messages_by_replied(&false).await,
            Db::SqliteDb(db) => db.count_messages_by_replied(&false).await,
        }
        .map_err(util::storage)
    }

    fn from_postgresdb_model(model: &MessagePostgresModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            name: model.name().to_owned(),
            email: model.email().to_owned(),
            phone: model.phone().clone(),
            company: model.company().clone(),
            subject: model.subject().clone(),
            message: model.message().to_owned(),
            replied: *model.replied(),
            replied_at: *model.replied_at(),
        }
    }

    fn to_postgresdb_model(&self) -> MessagePostgresModel {
        MessagePostgresModel::new(
            &self.id,
            &self.created_at,
            &self.name,
            &self.email,
            &self.phone,
            &self.company,
            &self.subject,
            &self.message,
            &self.replied,
            &self.replied_at,
        )
    }

    fn from_sqlitedb_model(model: &MessageSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            name: model.name().to_owned(),
            email: model.email().to_owned(),
            phone: model.phone().clone(),
            company: model.company().clone(),
            subject: model.subject().clone(),
            message: model.message().to_owned(),
            replied: *model.replied(),
            replied_at: *model.replied_at(),
        }
    }

    fn to_sqlitedb_model(&self) -> MessageSqliteModel {
        MessageSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.name,
            &self.email,
            &self.phone,
            &self.company,
            &self.subject,
            &self.message,
            &self.replied,
            &self.replied_at,
        )
    }
}
