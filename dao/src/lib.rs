use vx_db_postgresql::db::PostgresDb;
use vx_db_sqlite::db::SqliteDb;

pub mod admin;
pub mod meeting;
pub mod message;
pub mod otp_code;
pub mod resource;
pub mod upload;
mod util;

pub enum Db {
    PostgresqlDb(PostgresDb),
    SqliteDb(SqliteDb),
}
