//! SQLite storage for slicers
//!
//! A slicer is a named processing configuration; its `ProcessingRules`
//! aggregate is stored as an opaque JSON column and round-trips losslessly.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::types::ProcessingRules;

/// A named, persisted processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slicer {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub processing_rules: ProcessingRules,
    pub created_at: String,
    pub updated_at: String,
}

/// Repository for slicer persistence
pub struct SlicerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SlicerRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a slicer with the default processing rules
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Slicer> {
        let slicer = Slicer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            processing_rules: ProcessingRules::default(),
            created_at: Utc::now().to_rfc3339(),
            updated_at: Utc::now().to_rfc3339(),
        };

        let rules_json = serde_json::to_string(&slicer.processing_rules)?;

        sqlx::query(
            r#"
            INSERT INTO slicers (id, name, description, processing_rules, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&slicer.id)
        .bind(&slicer.name)
        .bind(&slicer.description)
        .bind(&rules_json)
        .bind(&slicer.created_at)
        .bind(&slicer.updated_at)
        .execute(self.pool)
        .await?;

        Ok(slicer)
    }

    /// Get a slicer by ID
    pub async fn get(&self, id: &str) -> Result<Option<Slicer>> {
        let row = sqlx::query_as::<_, SlicerRow>(
            r#"
            SELECT id, name, description, processing_rules, created_at, updated_at
            FROM slicers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| r.into_slicer()).transpose()
    }

    /// List all slicers, newest first
    pub async fn list(&self) -> Result<Vec<Slicer>> {
        let rows = sqlx::query_as::<_, SlicerRow>(
            r#"
            SELECT id, name, description, processing_rules, created_at, updated_at
            FROM slicers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_slicer()).collect()
    }

    /// Replace a slicer's processing rules (the explicit save operation)
    pub async fn update_rules(&self, id: &str, rules: &ProcessingRules) -> Result<bool> {
        let rules_json = serde_json::to_string(rules)?;

        let result = sqlx::query(
            r#"
            UPDATE slicers
            SET processing_rules = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&rules_json)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a slicer
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM slicers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Internal row type for SQLite queries
#[derive(sqlx::FromRow)]
struct SlicerRow {
    id: String,
    name: String,
    description: Option<String>,
    processing_rules: String,
    created_at: String,
    updated_at: String,
}

impl SlicerRow {
    fn into_slicer(self) -> Result<Slicer> {
        let processing_rules: ProcessingRules = serde_json::from_str(&self.processing_rules)?;

        Ok(Slicer {
            id: self.id,
            name: self.name,
            description: self.description,
            processing_rules,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
