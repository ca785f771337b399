use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use phenix_model::{
    Category, GalleryEntry, GalleryEntryDraft, GalleryEntryInput, GalleryOrder,
};
use serde_json::json;
use tracing::info;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub const MISSING_FIELDS: &str = "Titre et description sont requis";
pub const INVALID_ID: &str = "ID invalide";

fn not_found(category: Category) -> AppError {
    AppError::not_found(match category {
        Category::Art => "Œuvre non trouvée",
        Category::Fittings => "Aménagement non trouvé",
    })
}

fn deleted_message(category: Category) -> &'static str {
    match category {
        Category::Art => "Œuvre supprimée avec succès",
        Category::Fittings => "Aménagement supprimé avec succès",
    }
}

fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::bad_request(INVALID_ID))
}

fn draft(
    payload: Result<Json<GalleryEntryInput>, JsonRejection>,
) -> AppResult<GalleryEntryDraft> {
    let Json(input) =
        payload.map_err(|_| AppError::bad_request(MISSING_FIELDS))?;
    input
        .into_draft()
        .ok_or_else(|| AppError::bad_request(MISSING_FIELDS))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
) -> AppResult<Json<Vec<GalleryEntry>>> {
    let entries = state
        .db
        .gallery()
        .list(category, GalleryOrder::IdAscending)
        .await?;
    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<GalleryEntry>> {
    let id = parse_id(&raw_id)?;
    let entry = state
        .db
        .gallery()
        .find(id, category)
        .await?
        .ok_or_else(|| not_found(category))?;
    Ok(Json(entry))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
    payload: Result<Json<GalleryEntryInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let draft = draft(payload)?;
    let entry = state.db.gallery().create(category, draft).await?;
    info!(%category, id = entry.id, "gallery entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
    Path(raw_id): Path<String>,
    payload: Result<Json<GalleryEntryInput>, JsonRejection>,
) -> AppResult<Json<GalleryEntry>> {
    let id = parse_id(&raw_id)?;
    let draft = draft(payload)?;
    let entry = state
        .db
        .gallery()
        .update(id, category, draft)
        .await?
        .ok_or_else(|| not_found(category))?;
    info!(%category, id, "gallery entry updated");
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(category): Extension<Category>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_id(&raw_id)?;
    if !state.db.gallery().delete(id, category).await? {
        return Err(not_found(category));
    }
    info!(%category, id, "gallery entry deleted");
    Ok(Json(json!({ "message": deleted_message(category) })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, INVALID_ID);
    }

    #[test]
    fn messages_follow_category() {
        assert_eq!(not_found(Category::Art).message, "Œuvre non trouvée");
        assert_eq!(
            deleted_message(Category::Fittings),
            "Aménagement supprimé avec succès"
        );
    }
}
