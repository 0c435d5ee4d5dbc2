use anyhow::{bail, Result};
use itertools::Itertools;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{db::PostgresDb, model::resource::ResourceModel};

/// Every content collection gets its own table with the same shape.
pub const TABLES: [&str; 8] = [
    "services",
    "case_studies",
    "blog_posts",
    "careers",
    "applications",
    "team_members",
    "partners",
    "reviews",
];

const COLUMNS: [&str; 4] = ["id", "created_at", "updated_at", "data"];

pub async fn init(pool: &Pool<Postgres>, table: &str) -> Result<()> {
    vx_log::info(Some("🔧"), format!("[PostgreSQL] Setting up {table} table"));

    pool.execute(create_table(table).as_str()).await?;
    pool.execute(create_index(table, "created_at").as_str())
        .await?;

    Ok(())
}

fn create_table(table: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS \"{table}\" (\"id\" uuid, \"created_at\" timestamptz, \"updated_at\" timestamptz, \"data\" text NOT NULL, PRIMARY KEY (\"id\"))")
}

fn create_index(table: &str, column: &str) -> String {
    format!("CREATE INDEX IF NOT EXISTS \"{table}_{column}\" ON \"{table}\" (\"{column}\")")
}

fn insert(table: &str) -> String {
    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})",
        table,
        COLUMNS.iter().map(|col| format!("\"{col}\"")).join(", "),
        (1..=COLUMNS.len()).map(|idx| format!("${idx}")).join(", ")
    )
}

fn select(table: &str) -> String {
    format!(
        "SELECT {} FROM \"{}\" WHERE \"id\" = $1",
        COLUMNS.iter().map(|col| format!("\"{col}\"")).join(", "),
        table
    )
}

fn select_many(table: &str, descending: &bool) -> String {
    let kind = if *descending { "DESC" } else { "ASC" };
    format!(
        "SELECT {} FROM \"{}\" ORDER BY \"created_at\" {kind}, \"id\" {kind}",
        COLUMNS.iter().map(|col| format!("\"{col}\"")).join(", "),
        table
    )
}

fn update(table: &str) -> String {
    format!("UPDATE \"{table}\" SET \"updated_at\" = $1, \"data\" = $2 WHERE \"id\" = $3")
}

fn delete(table: &str) -> String {
    format!("DELETE FROM \"{table}\" WHERE \"id\" = $1")
}

fn check_table(table: &str) -> Result<()> {
    if !TABLES.contains(&table) {
        bail!("Unknown resource table '{table}'");
    }
    Ok(())
}

impl PostgresDb {
    pub async fn insert_resource(&self, table: &str, value: &ResourceModel) -> Result<()> {
        check_table(table)?;
        let query = insert(table);
        self.execute(
            sqlx::query(&query)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.data()),
        )
        .await?;
        Ok(())
    }

    pub async fn select_resource(&self, table: &str, id: &Uuid) -> Result<Option<ResourceModel>> {
        check_table(table)?;
        let query = select(table);
        self.fetch_optional(sqlx::query_as(&query).bind(id)).await
    }

    pub async fn select_many_resources(
        &self,
        table: &str,
        descending: &bool,
    ) -> Result<Vec<ResourceModel>> {
        check_table(table)?;
        let query = select_many(table, descending);
        self.fetch_all(sqlx::query_as(&query)).await
    }

    pub async fn update_resource(&self, table: &str, value: &ResourceModel) -> Result<bool> {
        check_table(table)?;
        let query = update(table);
        let res = self
            .execute(
                sqlx::query(&query)
                    .bind(value.updated_at())
                    .bind(value.data())
                    .bind(value.id()),
            )
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_resource(&self, table: &str, id: &Uuid) -> Result<bool> {
        check_table(table)?;
        let query = delete(table);
        let res = self.execute(sqlx::query(&query).bind(id)).await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{check_table, insert, select_many};

    #[test]
    fn builds_statements_for_known_tables() {
        assert_eq!(
            insert("services"),
            "INSERT INTO \"services\" (\"id\", \"created_at\", \"updated_at\", \"data\") VALUES ($1, $2, $3, $4)"
        );
        assert!(select_many("reviews", &false).ends_with("ORDER BY \"created_at\" ASC, \"id\" ASC"));
    }

    #[test]
    fn rejects_unknown_tables() {
        assert!(check_table("team_members").is_ok());
        assert!(check_table("admins; DROP TABLE admins").is_err());
    }
}
