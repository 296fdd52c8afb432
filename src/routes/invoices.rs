use axum::{
    Json, Router,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::{
    dto::invoices::{CreateInvoiceRequest, InvoiceList, InvoiceWithItems, SettleInvoiceRequest},
    dto::products::DeletedIds,
    dto::sales::BulkDeleteRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::InvoiceListQuery,
    services::invoice_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_invoice))
        .route("/", axum::routing::get(list_invoices))
        .route("/bulk-delete", axum::routing::post(delete_invoices))
        .route("/{id}", axum::routing::get(get_invoice))
        .route("/{id}", axum::routing::put(settle_invoice))
        .route("/{id}", axum::routing::delete(delete_invoice))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("payment_status" = Option<String>, Query, description = "Filter by Paid or Pending"),
    ),
    responses(
        (status = 200, description = "List invoices", body = ApiResponse<InvoiceList>)
    ),
    tag = "Invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<InvoiceListQuery>,
) -> AppResult<Json<ApiResponse<InvoiceList>>> {
    let resp = invoice_service::list_invoices(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Invoice with its line items", body = ApiResponse<InvoiceWithItems>),
        (status = 404, description = "Invoice not found"),
    ),
    tag = "Invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<InvoiceWithItems>>> {
    let resp = invoice_service::get_invoice(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Create invoice from a product basket", body = ApiResponse<InvoiceWithItems>),
        (status = 422, description = "Validation failed")
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInvoiceRequest>,
) -> AppResult<Json<ApiResponse<InvoiceWithItems>>> {
    let resp = invoice_service::create_invoice(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    request_body = SettleInvoiceRequest,
    responses(
        (status = 200, description = "Settlement recorded", body = ApiResponse<InvoiceWithItems>)
    ),
    tag = "Invoices"
)]
pub async fn settle_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SettleInvoiceRequest>,
) -> AppResult<Json<ApiResponse<InvoiceWithItems>>> {
    let resp = invoice_service::settle_invoice(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(
        ("id" = Uuid, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Deleted invoice")
    ),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = invoice_service::delete_invoice(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/invoices/bulk-delete",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "All listed invoices removed", body = ApiResponse<DeletedIds>)
    ),
    tag = "Invoices"
)]
pub async fn delete_invoices(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<ApiResponse<DeletedIds>>> {
    let resp = invoice_service::delete_invoices(&state, &user, payload).await?;
    Ok(Json(resp))
}
