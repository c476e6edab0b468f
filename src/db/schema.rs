//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL).execute(pool).await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Slicers table (named processing configurations)
CREATE TABLE IF NOT EXISTS slicers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    processing_rules TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_slicers_name ON slicers(name);

-- Documents table (page counts for registered PDFs)
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    page_count INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_documents_name ON documents(name);

-- Per-page text layers, one JSON blob per page
CREATE TABLE IF NOT EXISTS text_layers (
    document_id TEXT NOT NULL,
    page INTEGER NOT NULL,
    layer_json TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),

    PRIMARY KEY (document_id, page)
);

-- Extraction runs (one header row per run)
CREATE TABLE IF NOT EXISTS extraction_runs (
    id TEXT PRIMARY KEY,
    slicer_id TEXT NOT NULL,
    document_id TEXT NOT NULL,
    total_pages INTEGER NOT NULL,
    failures_json TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_runs_slicer ON extraction_runs(slicer_id);
CREATE INDEX IF NOT EXISTS idx_runs_document ON extraction_runs(document_id);

-- Extracted texts, ordered within their run
CREATE TABLE IF NOT EXISTS extracted_texts (
    id TEXT PRIMARY KEY,
    run_id TEXT NOT NULL,
    seq INTEGER NOT NULL,
    page_number INTEGER NOT NULL,
    text TEXT NOT NULL,
    rectangle_info TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_texts_run ON extracted_texts(run_id);
CREATE INDEX IF NOT EXISTS idx_texts_page ON extracted_texts(page_number);
"#;
