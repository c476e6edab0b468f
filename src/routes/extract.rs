//! Extraction API routes
//!
//! Runs a slicer's rules against a registered document and persists the
//! resulting run so extracted texts can be fetched later.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::documents::DocumentRepository;
use crate::error::{AppError, Result};
use crate::extract::{
    run_extraction, ExtractedText, ExtractionReport, ExtractionRun, ExtractionRunRepository,
};
use crate::rules::SlicerRepository;
use crate::state::AppState;

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/slicers/:slicer_id/documents/:document_id",
            post(run_extraction_for),
        )
        .route("/slicers/:slicer_id/runs", get(list_runs))
        .route("/runs/:run_id", get(get_run))
        .route("/runs/:run_id/texts", get(get_run_texts))
}

/// Response for a freshly executed run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunExtractionResponse {
    pub run_id: String,
    pub report: ExtractionReport,
}

/// Run extraction for a (slicer, document) pair
async fn run_extraction_for(
    State(state): State<AppState>,
    Path((slicer_id, document_id)): Path<(String, String)>,
) -> Result<Json<RunExtractionResponse>> {
    let slicers = SlicerRepository::new(state.db());
    let slicer = slicers
        .get(&slicer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Slicer not found: {}", slicer_id)))?;

    let documents = DocumentRepository::new(state.db());
    let report = run_extraction(&documents, &document_id, &slicer.processing_rules).await?;

    tracing::info!(
        "extraction run for slicer {} on document {}: {} texts, {} failed pages",
        slicer_id,
        document_id,
        report.texts.len(),
        report.failures.len()
    );

    let runs = ExtractionRunRepository::new(state.db());
    let run = runs.save_run(&slicer_id, &report).await?;

    Ok(Json(RunExtractionResponse {
        run_id: run.id,
        report,
    }))
}

/// List runs for a slicer
async fn list_runs(
    State(state): State<AppState>,
    Path(slicer_id): Path<String>,
) -> Result<Json<Vec<ExtractionRun>>> {
    let repo = ExtractionRunRepository::new(state.db());
    let runs = repo.list_runs(&slicer_id).await?;
    Ok(Json(runs))
}

/// Get a run header
async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<ExtractionRun>> {
    let repo = ExtractionRunRepository::new(state.db());
    let run = load_run(&repo, &run_id).await?;
    Ok(Json(run))
}

/// Get a run's extracted texts
async fn get_run_texts(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<Vec<ExtractedText>>> {
    let repo = ExtractionRunRepository::new(state.db());
    load_run(&repo, &run_id).await?;

    let texts = repo.texts_for_run(&run_id).await?;
    Ok(Json(texts))
}

async fn load_run(repo: &ExtractionRunRepository<'_>, run_id: &str) -> Result<ExtractionRun> {
    repo.get_run(run_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Extraction run not found: {}", run_id)))
}
