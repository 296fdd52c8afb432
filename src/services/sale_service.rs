use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::sales::{BulkDeleteRequest, CreateSaleRequest, SaleList, UpdateSaleRequest},
    dto::products::DeletedIds,
    entity::sales::{ActiveModel, Column, Entity as Sales, Model as SaleModel},
    error::{AppError, AppResult, FieldIssue},
    format::capitalize_every_word,
    middleware::auth::AuthUser,
    models::{PaymentMethod, PaymentStatus, Sale},
    response::{ApiResponse, Meta},
    routes::params::SaleListQuery,
    services::pricing,
    state::AppState,
};

// The three money fields move together: whenever quantity, unit cost or paid
// changes, total, balance and status are re-derived before the row is
// written.
fn derive_money(quantity: i32, unit_cost: i64, paid: i64) -> (i64, i64, PaymentStatus) {
    let total_cost = quantity as i64 * unit_cost;
    let balance = pricing::outstanding(total_cost, paid);
    (total_cost, balance, pricing::payment_status_for(balance))
}

fn check_sale_fields(
    quantity: i32,
    unit_cost: i64,
    paid: i64,
    status: PaymentStatus,
    customer_name: Option<&str>,
) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();
    if quantity <= 0 {
        issues.push(FieldIssue::new("quantity", "Quantity must be at least 1"));
    }
    if unit_cost < 0 {
        issues.push(FieldIssue::new("unit_cost", "Unit cost cannot be negative"));
    }
    if paid < 0 {
        issues.push(FieldIssue::new("paid", "Amount paid cannot be negative"));
    }
    // A pending balance needs someone to chase.
    if status == PaymentStatus::Pending
        && customer_name.map(str::trim).unwrap_or_default().is_empty()
    {
        issues.push(FieldIssue::new(
            "customer_name",
            "Customer name is required while payment is pending",
        ));
    }
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

pub async fn list_sales(state: &AppState, query: SaleListQuery) -> AppResult<ApiResponse<SaleList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut finder = Sales::find().order_by_desc(Column::CreatedAt);
    if let Some(status) = query.payment_status.as_ref().filter(|s| !s.is_empty()) {
        finder = finder.filter(Column::PaymentStatus.eq(status.clone()));
    }

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(sale_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Sales", SaleList { items }, Some(meta)))
}

pub async fn get_sale(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Sale>> {
    let sale = Sales::find_by_id(id).one(&state.orm).await?;
    let sale = match sale {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Sale", sale_from_entity(sale), None))
}

pub async fn create_sale(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSaleRequest,
) -> AppResult<ApiResponse<Sale>> {
    let (total_cost, balance, status) =
        derive_money(payload.quantity, payload.unit_cost, payload.paid);
    check_sale_fields(
        payload.quantity,
        payload.unit_cost,
        payload.paid,
        status,
        payload.customer_name.as_deref(),
    )
    .map_err(AppError::Validation)?;

    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        product_name: Set(capitalize_every_word(payload.product_name.trim())),
        quantity: Set(payload.quantity),
        unit_cost: Set(payload.unit_cost),
        total_cost: Set(total_cost),
        paid: Set(payload.paid),
        outstanding_balance: Set(balance),
        payment_method: Set(payload.payment_method.as_str().to_string()),
        payment_status: Set(status.as_str().to_string()),
        customer_name: Set(payload
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(capitalize_every_word)),
        created_by: Set(user.user_id),
        created_at: NotSet,
        updated_by: Set(user.user_id),
        updated_at: NotSet,
    };
    let sale = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sale_create",
        Some("sales"),
        Some(serde_json::json!({ "sale_id": sale.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Sale recorded",
        sale_from_entity(sale),
        Some(Meta::empty()),
    ))
}

// Partial merge, then re-derivation: a payload that only settles `paid`
// still leaves the row with consistent total/balance/status.
pub async fn update_sale(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSaleRequest,
) -> AppResult<ApiResponse<Sale>> {
    let existing = Sales::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let quantity = payload.quantity.unwrap_or(existing.quantity);
    let unit_cost = payload.unit_cost.unwrap_or(existing.unit_cost);
    let paid = payload.paid.unwrap_or(existing.paid);
    let (total_cost, balance, status) = derive_money(quantity, unit_cost, paid);

    let customer_name = payload
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(capitalize_every_word)
        .or_else(|| existing.customer_name.clone());

    check_sale_fields(quantity, unit_cost, paid, status, customer_name.as_deref())
        .map_err(AppError::Validation)?;

    let mut active: ActiveModel = existing.into();
    if let Some(product_name) = payload.product_name {
        active.product_name = Set(capitalize_every_word(product_name.trim()));
    }
    if let Some(method) = payload.payment_method {
        active.payment_method = Set(method.as_str().to_string());
    }
    active.quantity = Set(quantity);
    active.unit_cost = Set(unit_cost);
    active.paid = Set(paid);
    active.total_cost = Set(total_cost);
    active.outstanding_balance = Set(balance);
    active.payment_status = Set(status.as_str().to_string());
    active.customer_name = Set(customer_name);
    active.updated_by = Set(user.user_id);
    active.updated_at = Set(Utc::now().into());

    let sale = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sale_update",
        Some("sales"),
        Some(serde_json::json!({ "sale_id": sale.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        sale_from_entity(sale),
        Some(Meta::empty()),
    ))
}

pub async fn delete_sale(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Sales::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sale_delete",
        Some("sales"),
        Some(serde_json::json!({ "sale_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_sales(
    state: &AppState,
    user: &AuthUser,
    payload: BulkDeleteRequest,
) -> AppResult<ApiResponse<DeletedIds>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("No sale ids supplied".into()));
    }

    let txn = state.orm.begin().await?;
    Sales::delete_many()
        .filter(Column::Id.is_in(payload.ids.clone()))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "sale_bulk_delete",
        Some("sales"),
        Some(serde_json::json!({ "sale_ids": payload.ids })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        DeletedIds { ids: payload.ids },
        Some(Meta::empty()),
    ))
}

pub fn sale_from_entity(model: SaleModel) -> Sale {
    Sale {
        id: model.id,
        product_name: model.product_name,
        quantity: model.quantity,
        unit_cost: model.unit_cost,
        total_cost: model.total_cost,
        paid: model.paid,
        outstanding_balance: model.outstanding_balance,
        payment_method: PaymentMethod::parse(&model.payment_method)
            .unwrap_or(PaymentMethod::Cash),
        payment_status: PaymentStatus::parse(&model.payment_status)
            .unwrap_or(PaymentStatus::Pending),
        customer_name: model.customer_name,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
        updated_by: model.updated_by,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
