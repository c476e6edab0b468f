//! Document API routes
//!
//! Registration plus per-page text layer ingestion. The ingesting client is
//! responsible for normalizing layer coordinates to scale-1.0 page space.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::documents::{Document, DocumentRepository, TextLayer};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the documents router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents).post(register_document))
        .route("/:id", get(get_document).delete(delete_document))
        .route(
            "/:id/pages/:page/text-layer",
            get(get_text_layer).put(put_text_layer),
        )
}

/// Request body for registering a document
#[derive(Debug, Deserialize)]
pub struct RegisterDocumentRequest {
    pub name: String,
    #[serde(rename = "pageCount")]
    pub page_count: u32,
}

/// List all documents
async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>> {
    let repo = DocumentRepository::new(state.db());
    let documents = repo.list().await?;
    Ok(Json(documents))
}

/// Register a document
async fn register_document(
    State(state): State<AppState>,
    Json(req): Json<RegisterDocumentRequest>,
) -> Result<(StatusCode, Json<Document>)> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Document name is required".to_string()));
    }

    let repo = DocumentRepository::new(state.db());
    let document = repo.create(req.name.trim(), req.page_count).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Get a document
async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>> {
    let repo = DocumentRepository::new(state.db());
    let document = load_document(&repo, &id).await?;
    Ok(Json(document))
}

/// Delete a document and its text layers
async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let repo = DocumentRepository::new(state.db());
    if repo.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Document not found: {}", id)))
    }
}

/// Ingest (or replace) the text layer for one page
async fn put_text_layer(
    State(state): State<AppState>,
    Path((id, page)): Path<(String, u32)>,
    Json(layer): Json<TextLayer>,
) -> Result<StatusCode> {
    let repo = DocumentRepository::new(state.db());
    let document = load_document(&repo, &id).await?;

    if page == 0 || page > document.page_count {
        return Err(AppError::BadRequest(format!(
            "Page {} is out of range 1..={}",
            page, document.page_count
        )));
    }
    if layer.page != page {
        return Err(AppError::BadRequest(format!(
            "Layer is for page {}, path names page {}",
            layer.page, page
        )));
    }

    repo.set_text_layer(&id, &layer).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch the text layer for one page
async fn get_text_layer(
    State(state): State<AppState>,
    Path((id, page)): Path<(String, u32)>,
) -> Result<Json<TextLayer>> {
    let repo = DocumentRepository::new(state.db());
    load_document(&repo, &id).await?;

    let layer = repo.get_text_layer(&id, page).await?.ok_or_else(|| {
        AppError::NotFound(format!("No text layer for page {} of document {}", page, id))
    })?;
    Ok(Json(layer))
}

async fn load_document(repo: &DocumentRepository<'_>, id: &str) -> Result<Document> {
    repo.get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {}", id)))
}
