use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldInfo {
    pub name: String,
    pub required: bool,
    pub rule: String,
    pub transform: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentKindInfo {
    pub kind: String,
    pub title: String,
    pub default_output_file_name: String,
    pub fields: Vec<FieldInfo>,
}

#[derive(Serialize, ToSchema)]
pub struct DocumentKindList {
    pub items: Vec<DocumentKindInfo>,
}
