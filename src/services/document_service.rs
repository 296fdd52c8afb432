use std::collections::BTreeMap;

use crate::{
    audit::log_audit,
    documents::{self, DocumentKind, render},
    dto::documents::{DocumentKindInfo, DocumentKindList, FieldInfo},
    error::{AppError, AppResult, TemplateError},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub struct RenderedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn list_kinds() -> ApiResponse<DocumentKindList> {
    let items = DocumentKind::ALL
        .iter()
        .map(|kind| DocumentKindInfo {
            kind: kind.slug().to_string(),
            title: kind.title().to_string(),
            default_output_file_name: kind.default_output_file_name(&BTreeMap::new()),
            fields: kind
                .fields()
                .iter()
                .map(|spec| FieldInfo {
                    name: spec.name.to_string(),
                    required: spec.required.is_some(),
                    rule: spec.rule.as_str().to_string(),
                    transform: spec.transform.as_str().to_string(),
                })
                .collect(),
        })
        .collect();

    ApiResponse::success("Document kinds", DocumentKindList { items }, Some(Meta::empty()))
}

/// Validate, normalize, then fill the uploaded template. The zip work runs
/// on the blocking pool so a large template never stalls the event loop.
pub async fn render_document(
    state: &AppState,
    user: &AuthUser,
    kind: DocumentKind,
    template: Option<Vec<u8>>,
    fields: BTreeMap<String, String>,
) -> AppResult<RenderedDocument> {
    let template = template.ok_or(AppError::Template(TemplateError::Missing))?;

    documents::validate(kind, &fields).map_err(AppError::Validation)?;
    let normalized = documents::normalize(kind, &fields);
    let file_name = documents::output_file_name(kind, &normalized);

    let bytes = tokio::task::spawn_blocking(move || render::render(&template, &normalized))
        .await
        .map_err(|err| AppError::Internal(anyhow::anyhow!(err)))??;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "document_render",
        Some("documents"),
        Some(serde_json::json!({ "kind": kind.slug(), "file_name": file_name })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(RenderedDocument {
        file_name: format!("{file_name}.docx"),
        bytes,
    })
}
