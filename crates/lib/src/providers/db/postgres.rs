//! # PostgreSQL Content Store
//!
//! Reads website pages from a PostgreSQL table. A connection is opened for each
//! fetch and closed right after the query; there is no pool.

use crate::{errors::PromptError, providers::db::storage::DocumentStore, types::Document};
use async_trait::async_trait;
use regex::Regex;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection, PgRow},
    Connection, Row,
};
use std::fmt;
use tracing::{debug, info};

/// The table the brand's website pages are stored in.
pub const DEFAULT_DOCUMENTS_TABLE: &str = "dhonk_pages";

/// Connection settings for the PostgreSQL content store.
#[derive(Clone, Default)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// A [`DocumentStore`] backed by a PostgreSQL table with `title`, `url` and `content` columns.
#[derive(Clone, Debug)]
pub struct PostgresDocumentStore {
    settings: PostgresSettings,
    table: String,
}

impl PostgresDocumentStore {
    /// Creates a store reading from `table`.
    ///
    /// The table name is interpolated into SQL, so it must be a plain
    /// (optionally schema-qualified) identifier.
    pub fn new(settings: PostgresSettings, table: &str) -> Result<Self, PromptError> {
        let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;
        if !identifier.is_match(table) {
            return Err(PromptError::StorageConnection(format!(
                "Invalid documents table name '{table}'"
            )));
        }
        info!(host = %settings.host, database = %settings.database, %table, "Configured PostgreSQL content store");
        Ok(Self {
            settings,
            table: table.to_string(),
        })
    }

    fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.settings.host)
            .port(self.settings.port)
            .username(&self.settings.user)
            .database(&self.settings.database);
        if let Some(password) = &self.settings.password {
            options = options.password(password);
        }
        options
    }

    fn select_sql(&self) -> String {
        format!("SELECT title, url, content FROM {} LIMIT $1", self.table)
    }
}

fn row_to_document(row: &PgRow) -> Result<Document, sqlx::Error> {
    let title: Option<String> = row.try_get("title")?;
    Ok(Document {
        title: title.unwrap_or_default(),
        url: row.try_get("url")?,
        content: row.try_get("content")?,
    })
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn name(&self) -> &str {
        "PostgreSQL"
    }

    async fn fetch_documents(&self, limit: u32) -> Result<Vec<Document>, PromptError> {
        let mut conn = PgConnection::connect_with(&self.connect_options())
            .await
            .map_err(|e| PromptError::StorageConnection(e.to_string()))?;

        let rows = sqlx::query(&self.select_sql())
            .bind(i64::from(limit))
            .fetch_all(&mut conn)
            .await
            .map_err(|e| PromptError::StorageQueryFailed(e.to_string()));

        // Close before inspecting the result so a failed query still releases the connection.
        if let Err(e) = conn.close().await {
            debug!("Failed to close PostgreSQL connection cleanly: {e}");
        }

        let documents = rows?
            .iter()
            .map(row_to_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PromptError::StorageQueryFailed(e.to_string()))?;

        debug!(count = documents.len(), table = %self.table, "Fetched candidate documents");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_table_names_that_are_not_identifiers() {
        let settings = PostgresSettings::default();
        assert!(PostgresDocumentStore::new(settings.clone(), "dhonk_pages").is_ok());
        assert!(PostgresDocumentStore::new(settings.clone(), "public.dhonk_pages").is_ok());
        assert!(PostgresDocumentStore::new(settings, "pages; DROP TABLE x").is_err());
    }

    #[test]
    fn select_is_bounded_by_a_bind_parameter() {
        let store = PostgresDocumentStore::new(PostgresSettings::default(), "dhonk_pages").unwrap();
        assert_eq!(
            store.select_sql(),
            "SELECT title, url, content FROM dhonk_pages LIMIT $1"
        );
    }

    #[test]
    fn debug_output_hides_the_password() {
        let settings = PostgresSettings {
            password: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
