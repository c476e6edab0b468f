//! SQLite storage for extraction runs
//!
//! Each run persists its report header plus one row per extracted text, so
//! downstream consumers (dashboards, chat aggregation) can read results
//! long after the run finished.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::types::{ExtractedText, ExtractionReport, PageFailure, RectangleGeometry};

/// A persisted extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRun {
    pub id: String,
    pub slicer_id: String,
    pub document_id: String,
    pub total_pages: u32,
    pub failures: Vec<PageFailure>,
    pub created_at: String,
}

/// Repository for extraction run persistence
pub struct ExtractionRunRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ExtractionRunRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a run and its extracted texts atomically
    pub async fn save_run(
        &self,
        slicer_id: &str,
        report: &ExtractionReport,
    ) -> Result<ExtractionRun> {
        let run = ExtractionRun {
            id: Uuid::new_v4().to_string(),
            slicer_id: slicer_id.to_string(),
            document_id: report.document_id.clone(),
            total_pages: report.total_pages,
            failures: report.failures.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        let failures_json = serde_json::to_string(&run.failures)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO extraction_runs (id, slicer_id, document_id, total_pages, failures_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&run.id)
        .bind(&run.slicer_id)
        .bind(&run.document_id)
        .bind(run.total_pages as i64)
        .bind(&failures_json)
        .bind(&run.created_at)
        .execute(&mut *tx)
        .await?;

        for (seq, text) in report.texts.iter().enumerate() {
            let rectangle_info = text
                .rectangle_info
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;

            sqlx::query(
                r#"
                INSERT INTO extracted_texts (id, run_id, seq, page_number, text, rectangle_info)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&text.id)
            .bind(&run.id)
            .bind(seq as i64)
            .bind(text.page_number as i64)
            .bind(&text.text)
            .bind(&rectangle_info)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(run)
    }

    /// Get a run by ID
    pub async fn get_run(&self, run_id: &str) -> Result<Option<ExtractionRun>> {
        let row = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, slicer_id, document_id, total_pages, failures_json, created_at
            FROM extraction_runs
            WHERE id = ?
            "#,
        )
        .bind(run_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| r.into_run()).transpose()
    }

    /// List runs for a slicer, newest first
    pub async fn list_runs(&self, slicer_id: &str) -> Result<Vec<ExtractionRun>> {
        let rows = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, slicer_id, document_id, total_pages, failures_json, created_at
            FROM extraction_runs
            WHERE slicer_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(slicer_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_run()).collect()
    }

    /// The extracted texts of a run, in extraction order
    pub async fn texts_for_run(&self, run_id: &str) -> Result<Vec<ExtractedText>> {
        let rows = sqlx::query_as::<_, TextRow>(
            r#"
            SELECT id, page_number, text, rectangle_info
            FROM extracted_texts
            WHERE run_id = ?
            ORDER BY seq ASC
            "#,
        )
        .bind(run_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_text()).collect()
    }
}

/// Internal row type for SQLite queries
#[derive(sqlx::FromRow)]
struct RunRow {
    id: String,
    slicer_id: String,
    document_id: String,
    total_pages: i64,
    failures_json: String,
    created_at: String,
}

impl RunRow {
    fn into_run(self) -> Result<ExtractionRun> {
        let failures: Vec<PageFailure> = serde_json::from_str(&self.failures_json)?;

        Ok(ExtractionRun {
            id: self.id,
            slicer_id: self.slicer_id,
            document_id: self.document_id,
            total_pages: self.total_pages as u32,
            failures,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TextRow {
    id: String,
    page_number: i64,
    text: String,
    rectangle_info: Option<String>,
}

impl TextRow {
    fn into_text(self) -> Result<ExtractedText> {
        let rectangle_info: Option<RectangleGeometry> = self
            .rectangle_info
            .as_ref()
            .map(|s| serde_json::from_str(s))
            .transpose()?;

        Ok(ExtractedText {
            id: self.id,
            page_number: self.page_number as u32,
            text: self.text,
            rectangle_info,
        })
    }
}
