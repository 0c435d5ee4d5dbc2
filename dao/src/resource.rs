use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;
use vx_db_postgresql::model::resource::ResourceModel as ResourcePostgresModel;
use vx_db_sqlite::model::resource::ResourceModel as ResourceSqliteModel;
use vx_error::{Error, Result};

use crate::{util, Db};

/// Keys owned by the store. Client-supplied values for them are dropped.
const RESERVED_FIELDS: [&str; 4] = ["id", "_id", "createdAt", "updatedAt"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceCollection {
    Services,
    CaseStudies,
    BlogPosts,
    Careers,
    Applications,
    TeamMembers,
    Partners,
    Reviews,
}

impl ResourceCollection {
    pub const ALL: [Self; 8] = [
        Self::Services,
        Self::CaseStudies,
        Self::BlogPosts,
        Self::Careers,
        Self::Applications,
        Self::TeamMembers,
        Self::Partners,
        Self::Reviews,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::CaseStudies => "case_studies",
            Self::BlogPosts => "blog_posts",
            Self::Careers => "careers",
            Self::Applications => "applications",
            Self::TeamMembers => "team_members",
            Self::Partners => "partners",
            Self::Reviews => "reviews",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Services => &["title", "description"],
            Self::CaseStudies | Self::BlogPosts | Self::Careers => &["title"],
            Self::Applications => &["applicantName", "email"],
            Self::TeamMembers | Self::Partners => &["name"],
            Self::Reviews => &["name", "review"],
        }
    }

    /// Boolean field that hides an entry from public listings when `false`.
    pub fn visibility_field(&self) -> Option<&'static str> {
        match self {
            Self::BlogPosts => Some("isVisible"),
            Self::Careers => Some("active"),
            _ => None,
        }
    }

    /// Numeric field that takes precedence over creation time when listing.
    pub fn position_field(&self) -> Option<&'static str> {
        match self {
            Self::TeamMembers => Some("order"),
            Self::Reviews => Some("orderPosition"),
            _ => None,
        }
    }

    pub fn newest_first(&self) -> bool {
        !matches!(self, Self::Services | Self::TeamMembers)
    }
}

pub struct ResourceDao {
    collection: ResourceCollection,
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    data: Map<String, Value>,
}

impl ResourceDao {
    pub fn new(collection: &ResourceCollection, data: Value) -> Result<Self> {
        let data = sanitize(collection, data)?;
        let now = Utc::now();
        Ok(Self {
            collection: *collection,
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            data,
        })
    }

    pub fn collection(&self) -> &ResourceCollection {
        &self.collection
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Entries without the collection's visibility flag, or with it set to
    /// anything but `false`, are public.
    pub fn is_visible(&self) -> bool {
        match self.collection.visibility_field() {
            Some(field) => !matches!(self.data.get(field), Some(Value::Bool(false))),
            None => true,
        }
    }

    pub fn replace(&mut self, data: Value) -> Result<()> {
        self.data = sanitize(&self.collection, data)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Shallow merge: top-level keys in `patch` overwrite, `null` clears.
    pub fn merge(&mut self, patch: Value) -> Result<()> {
        let Value::Object(patch) = patch else {
            return Err(not_an_object());
        };
        let mut data = self.data.clone();
        for (key, value) in patch {
            if value.is_null() {
                data.remove(&key);
            } else {
                data.insert(key, value);
            }
        }
        self.replace(Value::Object(data))
    }

    pub fn to_json(&self) -> Value {
        let mut value = self.data.clone();
        value.insert("id".to_owned(), Value::String(self.id.to_string()));
        value.insert("createdAt".to_owned(), serde_json::json!(self.created_at));
        value.insert("updatedAt".to_owned(), serde_json::json!(self.updated_at));
        Value::Object(value)
    }

    pub async fn db_insert(&mut self, db: &Db) -> Result<()> {
        if self.collection == ResourceCollection::Reviews
            && !self.data.contains_key("orderPosition")
        {
            let next = Self::db_select_many(db, &self.collection)
                .await?
                .iter()
                .filter_map(|review| review.position())
                .fold(-1_f64, f64::max)
                + 1.0;
            self.data
                .insert("orderPosition".to_owned(), serde_json::json!(next as i64));
        }

        let data = self.encoded_data()?;
        let table = self.collection.table();
        match db {
            Db::PostgresqlDb(db) => {
                db.insert_resource(table, &self.to_postgresdb_model(&data))
                    .await
            }
            Db::SqliteDb(db) => db.insert_resource(table, &self.to_sqlitedb_model(&data)).await,
        }
        .map_err(util::storage)
    }

    pub async fn db_select(db: &Db, collection: &ResourceCollection, id: &Uuid) -> Result<Self> {
        let table = collection.table();
        match db {
            Db::PostgresqlDb(db) => match db.select_resource(table, id).await.map_err(util::storage)? {
                Some(model) => Self::from_postgresdb_model(collection, &model),
                None => Err(Error::item_not_found()),
            },
            Db::SqliteDb(db) => match db.select_resource(table, id).await.map_err(util::storage)? {
                Some(model) => Self::from_sqlitedb_model(collection, &model),
                None => Err(Error::item_not_found()),
            },
        }
    }

    /// Listed in the collection's display order.
    pub async fn db_select_many(db: &Db, collection: &ResourceCollection) -> Result<Vec<Self>> {
        let table = collection.table();
        let descending = collection.newest_first();
        let mut resources_data = Vec::new();
        match db {
            Db::PostgresqlDb(db) => {
                for model in db
                    .select_many_resources(table, &descending)
                    .await
                    .map_err(util::storage)?
                {
                    resources_data.push(Self::from_postgresdb_model(collection, &model)?);
                }
            }
            Db::SqliteDb(db) => {
                for model in db
                    .select_many_resources(table, &descending)
                    .await
                    .map_err(util::storage)?
                {
                    resources_data.push(Self::from_sqlitedb_model(collection, &model)?);
                }
            }
        }
        if collection.position_field().is_some() {
            resources_data.sort_by(|a, b| compare_positions(a.position(), b.position()));
        }
        Ok(resources_data)
    }

    pub async fn db_update(&self, db: &Db) -> Result<()> {
        let data = self.encoded_data()?;
        let table = self.collection.table();
        util::affected(
            match db {
                Db::PostgresqlDb(db) => {
                    db.update_resource(table, &self.to_postgresdb_model(&data))
                        .await
                }
                Db::SqliteDb(db) => db.update_resource(table, &self.to_sqlitedb_model(&data)).await,
            }
            .map_err(util::storage)?,
        )
    }

    pub async fn db_delete(db: &Db, collection: &ResourceCollection, id: &Uuid) -> Result<()> {
        let table = collection.table();
        util::affected(
            match db {
                Db::PostgresqlDb(db) => db.delete_resource(table, id).await,
                Db::SqliteDb(db) => db.delete_resource(table, id).await,
            }
            .map_err(util::storage)?,
        )
    }

    fn position(&self) -> Option<f64> {
        self.collection
            .position_field()
            .and_then(|field| self.data.get(field))
            .and_then(Value::as_f64)
    }

    fn encoded_data(&self) -> Result<String> {
        serde_json::to_string(&self.data)
            .map_err(|err| Error::Internal(format!("Failed to encode resource: {err}")))
    }

    fn decode_data(data: &str) -> Result<Map<String, Value>> {
        serde_json::from_str(data)
            .map_err(|err| Error::Storage(format!("Corrupt resource document: {err}")))
    }

    fn from_postgresdb_model(
        collection: &ResourceCollection,
        model: &ResourcePostgresModel,
    ) -> Result<Self> {
        Ok(Self {
            collection: *collection,
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            data: Self::decode_data(model.data())?,
        })
    }

    fn to_postgresdb_model(&self, data: &str) -> ResourcePostgresModel {
        ResourcePostgresModel::new(&self.id, &self.created_at, &self.updated_at, data)
    }

    fn from_sqlitedb_model(
        collection: &ResourceCollection,
        model: &ResourceSqliteModel,
    ) -> Result<Self> {
        Ok(Self {
            collection: *collection,
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            data: Self::decode_data(model.data())?,
        })
    }

    fn to_sqlitedb_model(&self, data: &str) -> ResourceSqliteModel {
        ResourceSqliteModel::new(&self.id, &self.created_at, &self.updated_at, data)
    }
}

fn sanitize(collection: &ResourceCollection, data: Value) -> Result<Map<String, Value>> {
    let Value::Object(mut data) = data else {
        return Err(not_an_object());
    };
    for field in RESERVED_FIELDS {
        data.remove(field);
    }

    let missing: Vec<&str> = collection
        .required_fields()
        .iter()
        .copied()
        .filter(|field| match data.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(value)) => value.trim().is_empty(),
            Some(_) => false,
        })
        .collect();
    if !missing.is_empty() {
        return Err(Error::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(data)
}

fn not_an_object() -> Error {
    Error::Validation("Request body must be a JSON object".to_owned())
}

/// Unpositioned entries sort after positioned ones.
fn compare_positions(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vx_error::Error;

    use super::{ResourceCollection, ResourceDao};

    #[test]
    fn required_fields_are_enforced() {
        let err = ResourceDao::new(&ResourceCollection::Services, json!({ "title": "Web" }))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Missing required fields: description");

        assert!(matches!(
            ResourceDao::new(&ResourceCollection::Partners, json!(["not", "an", "object"])),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn reserved_fields_are_ignored() {
        let resource = ResourceDao::new(
            &ResourceCollection::TeamMembers,
            json!({ "id": "spoofed", "createdAt": "1999-01-01", "name": "Ana" }),
        )
        .unwrap();

        assert!(!resource.data().contains_key("id"));
        assert!(!resource.data().contains_key("createdAt"));
        let value = resource.to_json();
        assert_eq!(value["id"], json!(resource.id().to_string()));
        assert_eq!(value["name"], json!("Ana"));
    }

    #[test]
    fn merge_overwrites_and_revalidates() {
        let mut resource = ResourceDao::new(
            &ResourceCollection::Services,
            json!({ "title": "Web", "description": "Sites", "icon": "globe" }),
        )
        .unwrap();

        resource
            .merge(json!({ "description": "Sites and apps", "icon": null }))
            .unwrap();
        assert_eq!(resource.data()["description"], json!("Sites and apps"));
        assert!(!resource.data().contains_key("icon"));
        assert_eq!(resource.data()["title"], json!("Web"));

        assert!(resource.merge(json!({ "title": "" })).is_err());
        assert_eq!(resource.data()["title"], json!("Web"));
    }

    #[test]
    fn visibility_flag_hides_only_when_false() {
        let hidden = ResourceDao::new(
            &ResourceCollection::BlogPosts,
            json!({ "title": "Draft", "isVisible": false }),
        )
        .unwrap();
        let shown =
            ResourceDao::new(&ResourceCollection::BlogPosts, json!({ "title": "Live" })).unwrap();
        let partner = ResourceDao::new(
            &ResourceCollection::Partners,
            json!({ "name": "Acme", "isVisible": false }),
        )
        .unwrap();

        assert!(!hidden.is_visible());
        assert!(shown.is_visible());
        assert!(partner.is_visible());
    }
}
