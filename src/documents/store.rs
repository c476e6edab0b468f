//! SQLite storage for documents and their text layers
//!
//! Text layers are stored one row per page as JSON, keyed by
//! `(document_id, page)`. The repository doubles as the extraction job's
//! [`TextLayerProvider`].

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::types::{Document, TextLayer};
use crate::extract::{ExtractionError, TextLayerProvider};

/// Repository for document persistence
pub struct DocumentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a document
    pub async fn create(&self, name: &str, page_count: u32) -> Result<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            page_count,
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"
            INSERT INTO documents (id, name, page_count, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&document.id)
        .bind(&document.name)
        .bind(document.page_count as i64)
        .bind(&document.created_at)
        .execute(self.pool)
        .await?;

        Ok(document)
    }

    /// Get a document by ID
    pub async fn get(&self, id: &str) -> Result<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, name, page_count, created_at
            FROM documents
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_document()))
    }

    /// List all documents, newest first
    pub async fn list(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, name, page_count, created_at
            FROM documents
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_document()).collect())
    }

    /// Delete a document and its text layers
    pub async fn delete(&self, id: &str) -> Result<bool> {
        sqlx::query("DELETE FROM text_layers WHERE document_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        let result = sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Store or replace the text layer for one page
    pub async fn set_text_layer(&self, document_id: &str, layer: &TextLayer) -> Result<()> {
        let layer_json = serde_json::to_string(layer)?;

        sqlx::query(
            r#"
            INSERT INTO text_layers (document_id, page, layer_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(document_id, page) DO UPDATE SET
                layer_json = excluded.layer_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(document_id)
        .bind(layer.page as i64)
        .bind(&layer_json)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the text layer for one page, if ingested
    pub async fn get_text_layer(&self, document_id: &str, page: u32) -> Result<Option<TextLayer>> {
        let json = self.text_layer_json(document_id, page).await?;
        json.map(|j| serde_json::from_str(&j).map_err(Into::into))
            .transpose()
    }

    async fn text_layer_json(
        &self,
        document_id: &str,
        page: u32,
    ) -> sqlx::Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT layer_json FROM text_layers WHERE document_id = ? AND page = ?",
        )
        .bind(document_id)
        .bind(page as i64)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.0))
    }
}

#[async_trait]
impl<'a> TextLayerProvider for DocumentRepository<'a> {
    async fn page_count(&self, document_id: &str) -> Result<u32, ExtractionError> {
        match self.get(document_id).await {
            Ok(Some(document)) => Ok(document.page_count),
            Ok(None) => Err(ExtractionError::DocumentNotFound(document_id.to_string())),
            Err(e) => Err(ExtractionError::Storage(e.to_string())),
        }
    }

    async fn text_layer(&self, document_id: &str, page: u32) -> Result<TextLayer, ExtractionError> {
        let json = self
            .text_layer_json(document_id, page)
            .await
            .map_err(|e| ExtractionError::Storage(e.to_string()))?;

        match json {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                ExtractionError::CorruptTextLayer {
                    page,
                    message: e.to_string(),
                }
            }),
            None => Err(ExtractionError::TextLayerMissing {
                document_id: document_id.to_string(),
                page,
            }),
        }
    }
}

/// Internal row type for SQLite queries
#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    name: String,
    page_count: i64,
    created_at: String,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        Document {
            id: self.id,
            name: self.name,
            page_count: self.page_count as u32,
            created_at: self.created_at,
        }
    }
}
