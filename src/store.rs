//! Document collections on PostgreSQL: one JSONB table per model inside the `db_name` schema.

use crate::error::AppError;
use crate::registry::ModelRegistry;
use serde_json::{Map, Value};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Key every stored document carries.
pub const ID_FIELD: &str = "_id";

/// Handle to the backing collection of one model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    /// Schema-qualified, quoted table name.
    pub table: String,
}

/// Anything that can hand out collection handles by model name.
pub trait CollectionSource {
    fn get_collection(&self, name: &str) -> Collection;
}

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// A PostgreSQL schema standing in for a document database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    pub schema: String,
}

impl Namespace {
    pub fn new(schema: impl Into<String>) -> Self {
        Namespace { schema: schema.into() }
    }
}

impl CollectionSource for Namespace {
    fn get_collection(&self, name: &str) -> Collection {
        Collection {
            name: name.to_string(),
            table: format!("{}.{}", quoted(&self.schema), quoted(name)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DocumentStore {
    pub pool: PgPool,
    pub namespace: Namespace,
}

impl CollectionSource for DocumentStore {
    fn get_collection(&self, name: &str) -> Collection {
        self.namespace.get_collection(name)
    }
}

impl DocumentStore {
    pub fn new(pool: PgPool, namespace: Namespace) -> Self {
        DocumentStore { pool, namespace }
    }

    /// Create the namespace schema and one table per registered model.
    pub async fn ensure_collections(&self, registry: &ModelRegistry) -> Result<(), AppError> {
        sqlx::query(&format!(
            "CREATE SCHEMA IF NOT EXISTS {}",
            quoted(&self.namespace.schema)
        ))
        .execute(&self.pool)
        .await?;
        for model in registry.all() {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {} (_id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
                model.collection.table
            );
            tracing::debug!(sql = %ddl, "query");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        tracing::info!(
            schema = %self.namespace.schema,
            collections = registry.len(),
            "collections ready"
        );
        Ok(())
    }

    /// Documents containing every key/value of `filter`, ordered by `_id`.
    pub async fn find(&self, coll: &Collection, filter: &Map<String, Value>) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT doc FROM {} WHERE doc @> $1 ORDER BY _id", coll.table);
        let filter = Value::Object(filter.clone());
        tracing::debug!(sql = %sql, params = ?filter, "query");
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .bind(filter)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_one(&self, coll: &Collection, id: &str) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT doc FROM {} WHERE _id = $1", coll.table);
        tracing::debug!(sql = %sql, params = ?id, "query");
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a document, assigning a new `_id` unless the document carries a string one.
    pub async fn insert(&self, coll: &Collection, mut doc: Map<String, Value>) -> Result<Value, AppError> {
        let id = match doc.get(ID_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        doc.insert(ID_FIELD.into(), Value::String(id.clone()));
        let sql = format!("INSERT INTO {} (_id, doc) VALUES ($1, $2) RETURNING doc", coll.table);
        let doc = Value::Object(doc);
        tracing::debug!(sql = %sql, params = ?doc, "query");
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(&id)
            .bind(doc)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| insert_error(coll, &id, e))?;
        Ok(row)
    }

    /// Replace the document stored under `id`. The stored `_id` always wins over the body's.
    pub async fn replace(
        &self,
        coll: &Collection,
        id: &str,
        mut doc: Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        doc.insert(ID_FIELD.into(), Value::String(id.to_string()));
        let sql = format!("UPDATE {} SET doc = $2 WHERE _id = $1 RETURNING doc", coll.table);
        let doc = Value::Object(doc);
        tracing::debug!(sql = %sql, params = ?doc, "query");
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .bind(doc)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete by id. Returns the deleted document or None.
    pub async fn delete(&self, coll: &Collection, id: &str) -> Result<Option<Value>, AppError> {
        let sql = format!("DELETE FROM {} WHERE _id = $1 RETURNING doc", coll.table);
        tracing::debug!(sql = %sql, params = ?id, "query");
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

/// A taken `_id` is the caller's conflict, not a database fault.
fn insert_error(coll: &Collection, id: &str, e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict(format!("{} '{}' already exists", coll.name, id))
        }
        other => AppError::Db(other),
    }
}

/// Ensure the target database exists. Connects to the `postgres` maintenance DB and creates it if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = sqlx::postgres::PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid database url: {}", e)))?;
    let db_name = opts.get_database().unwrap_or("postgres").to_string();
    if db_name == "postgres" {
        return Ok(());
    }
    let mut conn = opts.clone().database("postgres").connect().await?;
    let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&db_name)
        .fetch_optional(&mut conn)
        .await?;
    if exists.is_none() {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_qualifies_and_quotes_tables() {
        let ns = Namespace::new("database");
        let coll = ns.get_collection("task");
        assert_eq!(coll.name, "task");
        assert_eq!(coll.table, "\"database\".\"task\"");
    }

    #[test]
    fn non_unique_insert_errors_stay_database_errors() {
        let coll = Namespace::new("database").get_collection("task");
        let err = insert_error(&coll, "42", sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Db(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn quoted_escapes_embedded_quotes() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
