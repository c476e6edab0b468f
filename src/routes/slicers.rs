//! Slicer API routes
//!
//! CRUD for slicers plus the rule-editing operations. `PUT /:id/rules` is
//! the explicit save of a full aggregate; the toggle and annotation
//! endpoints load, mutate and save within one request, rejecting invalid
//! mutations without touching stored state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::rules::{ProcessingRules, Rectangle, Slicer, SlicerRepository};
use crate::state::AppState;

/// Create the slicers router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_slicers).post(create_slicer))
        .route("/:id", get(get_slicer).delete(delete_slicer))
        .route("/:id/rules", get(get_rules).put(save_rules))
        .route("/:id/rules/included", get(included_pages))
        .route("/:id/rules/pages/:page/toggle", post(toggle_page))
        .route("/:id/rules/annotations", delete(clear_annotations))
        .route(
            "/:id/rules/annotations/:page",
            post(add_rectangle).delete(clear_page),
        )
        .route(
            "/:id/rules/annotations/:page/:rect_id",
            delete(remove_rectangle),
        )
}

/// Request body for creating a slicer
#[derive(Debug, Deserialize)]
pub struct CreateSlicerRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Query parameters for resolving the included-page set
#[derive(Debug, Deserialize)]
pub struct IncludedQuery {
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Resolved included-page set for a document size
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludedPagesResponse {
    pub total_pages: u32,
    pub included_pages: Vec<u32>,
}

/// List all slicers
async fn list_slicers(State(state): State<AppState>) -> Result<Json<Vec<Slicer>>> {
    let repo = SlicerRepository::new(state.db());
    let slicers = repo.list().await?;
    Ok(Json(slicers))
}

/// Create a slicer with default processing rules
async fn create_slicer(
    State(state): State<AppState>,
    Json(req): Json<CreateSlicerRequest>,
) -> Result<(StatusCode, Json<Slicer>)> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Slicer name is required".to_string()));
    }

    let repo = SlicerRepository::new(state.db());
    let slicer = repo.create(req.name.trim(), req.description.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(slicer)))
}

/// Get a slicer
async fn get_slicer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Slicer>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;
    Ok(Json(slicer))
}

/// Delete a slicer
async fn delete_slicer(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let repo = SlicerRepository::new(state.db());
    if repo.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Slicer not found: {}", id)))
    }
}

/// Get a slicer's processing rules
async fn get_rules(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;
    Ok(Json(slicer.processing_rules))
}

/// Replace a slicer's processing rules (the explicit save)
async fn save_rules(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(rules): Json<ProcessingRules>,
) -> Result<Json<ProcessingRules>> {
    rules.validate()?;

    let repo = SlicerRepository::new(state.db());
    if !repo.update_rules(&id, &rules).await? {
        return Err(AppError::NotFound(format!("Slicer not found: {}", id)));
    }
    Ok(Json(rules))
}

/// Resolve the included-page set for a given document size
async fn included_pages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<IncludedQuery>,
) -> Result<Json<IncludedPagesResponse>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let included = slicer
        .processing_rules
        .page_selection
        .included_pages(query.total_pages)?;

    Ok(Json(IncludedPagesResponse {
        total_pages: query.total_pages,
        included_pages: included.into_iter().collect(),
    }))
}

/// Toggle one page's inclusion
async fn toggle_page(
    State(state): State<AppState>,
    Path((id, page)): Path<(String, u32)>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let mut rules = slicer.processing_rules;
    rules.page_selection.toggle_page(page)?;

    repo.update_rules(&id, &rules).await?;
    Ok(Json(rules))
}

/// Add a rectangle annotation to a page
async fn add_rectangle(
    State(state): State<AppState>,
    Path((id, page)): Path<(String, u32)>,
    Json(rect): Json<Rectangle>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let mut rules = slicer.processing_rules;
    rules.add_rectangle(page, rect)?;

    repo.update_rules(&id, &rules).await?;
    Ok(Json(rules))
}

/// Remove a rectangle by id; removing a nonexistent one is a no-op
async fn remove_rectangle(
    State(state): State<AppState>,
    Path((id, page, rect_id)): Path<(String, u32, String)>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let mut rules = slicer.processing_rules;
    if rules.remove_rectangle(page, &rect_id) {
        repo.update_rules(&id, &rules).await?;
    }
    Ok(Json(rules))
}

/// Clear all annotations on a page
async fn clear_page(
    State(state): State<AppState>,
    Path((id, page)): Path<(String, u32)>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let mut rules = slicer.processing_rules;
    if rules.clear_page(page) {
        repo.update_rules(&id, &rules).await?;
    }
    Ok(Json(rules))
}

/// Clear all annotations on all pages
async fn clear_annotations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProcessingRules>> {
    let repo = SlicerRepository::new(state.db());
    let slicer = load_slicer(&repo, &id).await?;

    let mut rules = slicer.processing_rules;
    rules.clear_annotations();

    repo.update_rules(&id, &rules).await?;
    Ok(Json(rules))
}

async fn load_slicer(repo: &SlicerRepository<'_>, id: &str) -> Result<Slicer> {
    repo.get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Slicer not found: {}", id)))
}
