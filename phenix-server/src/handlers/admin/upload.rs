use axum::{
    Json,
    extract::{Multipart, State},
};
use chrono::Utc;
use futures::future::try_join_all;
use phenix_core::storage::upload_path;
use serde::Serialize;
use tracing::{debug, info};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

pub const FIELD_NAME: &str = "images";
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
/// Request body cap for the upload route; per-file limits are enforced
/// separately so oversized files get a readable error.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024 * 1024;
pub const ALLOWED_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

#[derive(Debug)]
struct UploadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl UploadedFile {
    fn validate(&self) -> AppResult<()> {
        if !ALLOWED_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::bad_request(format!(
                "Type de fichier non supporté: {}. Types acceptés: JPEG, PNG, WebP",
                self.content_type
            )));
        }
        if self.bytes.len() > MAX_FILE_BYTES {
            return Err(AppError::bad_request(format!(
                "Fichier trop volumineux: {}. Taille maximale: 10MB",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub urls: Vec<String>,
    pub message: String,
}

async fn read_files(mut multipart: Multipart) -> AppResult<Vec<UploadedFile>> {
    let invalid = |_| AppError::bad_request("Requête multipart invalide");
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() != Some(FIELD_NAME) {
            continue;
        }
        let name = field.file_name().unwrap_or("image").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(invalid)?.to_vec();
        debug!(name = %name, content_type = %content_type, size = bytes.len(), "received upload");
        files.push(UploadedFile {
            name,
            content_type,
            bytes,
        });
    }
    Ok(files)
}

pub async fn upload_images(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let files = read_files(multipart).await?;
    if files.is_empty() {
        return Err(AppError::bad_request("Aucune image fournie"));
    }
    for file in &files {
        file.validate()?;
    }

    let now = Utc::now();
    let uploads = files.into_iter().map(|file| {
        let path = upload_path(&file.name, now, &mut rand::rng());
        let blobs = state.blobs.clone();
        async move { blobs.put(&path, file.bytes, &file.content_type).await }
    });
    let urls: Vec<String> = try_join_all(uploads)
        .await?
        .into_iter()
        .map(|blob| blob.url)
        .collect();

    info!(count = urls.len(), "images uploaded");
    Ok(Json(UploadResponse {
        message: format!("{} image(s) uploadée(s) avec succès", urls.len()),
        urls,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            name: "portail.jpg".into(),
            content_type: content_type.into(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn accepts_listed_image_types() {
        for content_type in ALLOWED_TYPES {
            assert!(file(content_type, 16).validate().is_ok());
        }
    }

    #[test]
    fn rejects_other_types_and_large_files() {
        let gif = file("image/gif", 16).validate().unwrap_err();
        assert!(gif.message.contains("image/gif"));

        let large = file("image/png", MAX_FILE_BYTES + 1).validate().unwrap_err();
        assert!(large.message.contains("portail.jpg"));
        assert!(file("image/png", MAX_FILE_BYTES).validate().is_ok());
    }
}
