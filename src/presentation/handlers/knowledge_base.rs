use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::extract::ApiJson;
use crate::application::ports::KnowledgeBaseClient;
use crate::domain::UploadedFile;
use crate::presentation::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct CreateDocumentRequest {
    pub text: String,
}

/// Line shown in the page's status bar.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn create_document_handler<C>(
    State(state): State<AppState<C>>,
    ApiJson(request): ApiJson<CreateDocumentRequest>,
) -> Result<Json<StatusResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let status = state.knowledge_base_service.create(&request.text).await?;
    Ok(Json(StatusResponse::new(status)))
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler<C>(
    State(state): State<AppState<C>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<StatusResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let mut multipart = multipart?;
    let file = read_upload(&mut multipart).await?;

    tracing::debug!(
        file_name = %file.file_name,
        bytes = file.size_bytes(),
        "File received"
    );

    let status = state.knowledge_base_service.upload(file).await?;
    Ok(Json(StatusResponse::new(status)))
}

#[tracing::instrument(skip(state))]
pub async fn clear_handler<C>(
    State(state): State<AppState<C>>,
) -> Result<Json<StatusResponse>, ApiError>
where
    C: KnowledgeBaseClient + 'static,
{
    let status = state.knowledge_base_service.clear().await?;
    Ok(Json(StatusResponse::new(status)))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return Err(ApiError::bad_request("No file uploaded"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(ApiError::new(
                    e.status(),
                    format!("Failed to read multipart: {}", e.body_text()),
                ));
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("document").to_string();
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            ApiError::new(e.status(), format!("Failed to read file: {}", e.body_text()))
        })?;

        return Ok(UploadedFile::new(file_name, content_type, data.to_vec()));
    }
}
