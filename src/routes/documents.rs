use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    documents::{DOCX_MIME, DocumentKind},
    dto::documents::DocumentKindList,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::document_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_kinds))
        .route("/{kind}", post(render_document))
}

#[utoipa::path(
    get,
    path = "/api/documents",
    responses(
        (status = 200, description = "Available document kinds and their field specs", body = ApiResponse<DocumentKindList>)
    ),
    tag = "Documents"
)]
pub async fn list_kinds(_user: AuthUser) -> Json<ApiResponse<DocumentKindList>> {
    Json(document_service::list_kinds())
}

/// Multipart upload: a `template` file part plus either a `payload` part
/// holding a JSON object of fields or one text part per field. The response
/// is the filled document as a download.
#[utoipa::path(
    post,
    path = "/api/documents/{kind}",
    params(
        ("kind" = String, Path, description = "Document kind slug, e.g. change-of-name")
    ),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Filled document download"),
        (status = 422, description = "Validation or template failure")
    ),
    tag = "Documents"
)]
pub async fn render_document(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<DocumentKind>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut template: Option<Vec<u8>> = None;
    let mut fields: BTreeMap<String, String> = BTreeMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Invalid multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "template" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::BadRequest(format!("Unreadable template: {err}")))?;
                template = Some(bytes.to_vec());
            }
            "payload" => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| AppError::BadRequest(format!("Unreadable payload: {err}")))?;
                let map: BTreeMap<String, String> = serde_json::from_str(&text)
                    .map_err(|err| AppError::BadRequest(format!("Invalid payload JSON: {err}")))?;
                fields.extend(map);
            }
            "" => continue,
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| AppError::BadRequest(format!("Unreadable field: {err}")))?;
                fields.insert(name, text);
            }
        }
    }

    let doc = document_service::render_document(&state, &user, kind, template, fields).await?;

    let headers = [
        (header::CONTENT_TYPE, DOCX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.file_name),
        ),
    ];
    Ok((headers, doc.bytes).into_response())
}
