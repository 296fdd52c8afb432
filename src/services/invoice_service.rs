use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::invoices::{CreateInvoiceRequest, InvoiceList, InvoiceWithItems, SettleInvoiceRequest},
    dto::products::DeletedIds,
    dto::sales::BulkDeleteRequest,
    entity::{
        invoice_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as InvoiceItems,
            Model as ItemModel,
        },
        invoices::{ActiveModel as InvoiceActive, Column as InvoiceCol, Entity as Invoices,
            Model as InvoiceModel},
        products::Entity as Products,
    },
    error::{AppError, AppResult, FieldIssue},
    format::capitalize_every_word,
    middleware::auth::AuthUser,
    models::{Invoice, InvoiceItem, PaymentMethod, PaymentStatus},
    response::{ApiResponse, Meta},
    routes::params::InvoiceListQuery,
    services::pricing,
    services::product_service::product_from_entity,
    state::AppState,
};

pub async fn list_invoices(
    state: &AppState,
    query: InvoiceListQuery,
) -> AppResult<ApiResponse<InvoiceList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut finder = Invoices::find().order_by_desc(InvoiceCol::CreatedAt);
    if let Some(status) = query.payment_status.as_ref().filter(|s| !s.is_empty()) {
        finder = finder.filter(InvoiceCol::PaymentStatus.eq(status.clone()));
    }

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(invoice_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Invoices",
        InvoiceList { items },
        Some(meta),
    ))
}

/// Prices every basket line (custom override, else generator price while the
/// toggle is on, else base price), snapshots the lines, and stores the
/// aggregate totals. The totals are never recomputed on read.
pub async fn create_invoice(
    state: &AppState,
    user: &AuthUser,
    payload: CreateInvoiceRequest,
) -> AppResult<ApiResponse<InvoiceWithItems>> {
    let mut issues = Vec::new();
    if payload.customer_name.trim().is_empty() {
        issues.push(FieldIssue::new("customer_name", "Customer name is required"));
    }
    if payload.items.is_empty() {
        issues.push(FieldIssue::new("items", "An invoice needs at least one line"));
    }
    if payload.items.iter().any(|line| line.quantity <= 0) {
        issues.push(FieldIssue::new("items", "Quantities must be at least 1"));
    }
    if payload.total_paid < 0 {
        issues.push(FieldIssue::new("total_paid", "Amount paid cannot be negative"));
    }
    if !issues.is_empty() {
        return Err(AppError::Validation(issues));
    }

    let txn = state.orm.begin().await?;

    let mut lines = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let product = Products::find_by_id(line.product_id).one(&txn).await?;
        let product = match product {
            Some(p) => product_from_entity(p),
            None => {
                return Err(AppError::BadRequest(format!(
                    "Unknown product {}",
                    line.product_id
                )));
            }
        };
        let unit_cost =
            pricing::effective_unit_price(&product, line.custom_price, payload.gen_is_on);
        lines.push((product.product_name, line.quantity, unit_cost));
    }

    let total_cost: i64 = lines
        .iter()
        .map(|(_, quantity, unit_cost)| *quantity as i64 * unit_cost)
        .sum();
    let balance = pricing::outstanding(total_cost, payload.total_paid);
    let status = pricing::payment_status_for(balance);

    let invoice_id = Uuid::new_v4();
    let invoice = InvoiceActive {
        id: Set(invoice_id),
        customer_name: Set(capitalize_every_word(payload.customer_name.trim())),
        total_cost: Set(total_cost),
        total_paid: Set(payload.total_paid),
        outstanding_balance: Set(balance),
        payment_method: Set(payload.payment_method.as_str().to_string()),
        payment_status: Set(status.as_str().to_string()),
        created_by: Set(user.user_id),
        created_at: NotSet,
        updated_by: Set(user.user_id),
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut stored_items: Vec<InvoiceItem> = Vec::with_capacity(lines.len());
    for (position, (product_name, quantity, unit_cost)) in lines.into_iter().enumerate() {
        let item = ItemActive {
            id: Set(Uuid::new_v4()),
            invoice_id: Set(invoice.id),
            position: Set(position as i32),
            product_name: Set(product_name),
            quantity: Set(quantity),
            unit_cost: Set(unit_cost),
            total_cost: Set(quantity as i64 * unit_cost),
        }
        .insert(&txn)
        .await?;
        stored_items.push(item_from_entity(item));
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "invoice_create",
        Some("invoices"),
        Some(serde_json::json!({ "invoice_id": invoice.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Invoice created",
        InvoiceWithItems {
            invoice: invoice_from_entity(invoice),
            items: stored_items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_invoice(state: &AppState, id: Uuid) -> AppResult<ApiResponse<InvoiceWithItems>> {
    let invoice = Invoices::find_by_id(id).one(&state.orm).await?;
    let invoice = match invoice {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let items = InvoiceItems::find()
        .filter(ItemCol::InvoiceId.eq(invoice.id))
        .order_by_asc(ItemCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Invoice",
        InvoiceWithItems {
            invoice: invoice_from_entity(invoice),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Settlement touches the paid amount (and optionally the method); the line
/// items are a snapshot and stay untouched. Balance and status are
/// re-derived from the stored total.
pub async fn settle_invoice(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SettleInvoiceRequest,
) -> AppResult<ApiResponse<InvoiceWithItems>> {
    if payload.total_paid < 0 {
        return Err(AppError::Validation(vec![FieldIssue::new(
            "total_paid",
            "Amount paid cannot be negative",
        )]));
    }

    let invoice = Invoices::find_by_id(id).one(&state.orm).await?;
    let invoice = match invoice {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let balance = pricing::outstanding(invoice.total_cost, payload.total_paid);
    let status = pricing::payment_status_for(balance);

    let mut active: InvoiceActive = invoice.into();
    active.total_paid = Set(payload.total_paid);
    active.outstanding_balance = Set(balance);
    active.payment_status = Set(status.as_str().to_string());
    if let Some(method) = payload.payment_method {
        active.payment_method = Set(method.as_str().to_string());
    }
    active.updated_by = Set(user.user_id);
    active.updated_at = Set(Utc::now().into());
    let invoice = active.update(&state.orm).await?;

    let items = InvoiceItems::find()
        .filter(ItemCol::InvoiceId.eq(invoice.id))
        .order_by_asc(ItemCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "invoice_settle",
        Some("invoices"),
        Some(serde_json::json!({ "invoice_id": invoice.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        InvoiceWithItems {
            invoice: invoice_from_entity(invoice),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_invoice(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Invoices::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "invoice_delete",
        Some("invoices"),
        Some(serde_json::json!({ "invoice_id": id })),
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

pub async fn delete_invoices(
    state: &AppState,
    user: &AuthUser,
    payload: BulkDeleteRequest,
) -> AppResult<ApiResponse<DeletedIds>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("No invoice ids supplied".into()));
    }

    let txn = state.orm.begin().await?;
    Invoices::delete_many()
        .filter(InvoiceCol::Id.is_in(payload.ids.clone()))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "invoice_bulk_delete",
        Some("invoices"),
        Some(serde_json::json!({ "invoice_ids": payload.ids })),
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

fn invoice_from_entity(model: InvoiceModel) -> Invoice {
    Invoice {
        id: model.id,
        customer_name: model.customer_name,
        total_cost: model.total_cost,
        total_paid: model.total_paid,
        outstanding_balance: model.outstanding_balance,
        payment_method: PaymentMethod::parse(&model.payment_method)
            .unwrap_or(PaymentMethod::Cash),
        payment_status: PaymentStatus::parse(&model.payment_status)
            .unwrap_or(PaymentStatus::Pending),
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
        updated_by: model.updated_by,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn item_from_entity(model: ItemModel) -> InvoiceItem {
    InvoiceItem {
        id: model.id,
        invoice_id: model.invoice_id,
        position: model.position,
        product_name: model.product_name,
        quantity: model.quantity,
        unit_cost: model.unit_cost,
        total_cost: model.total_cost,
    }
}
