use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{
        BulkDeleteRequest, CreateProductRequest, DeletedIds, ProductList, UpdateProductRequest,
    },
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult, FieldIssue},
    format::capitalize_every_word,
    middleware::auth::AuthUser,
    models::{Product, ProductCategory},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(Expr::col(Column::ProductName).ilike(pattern));
    }

    // Favorites lead; within each group the insertion order is kept, so the
    // listing matches what the client-side filter hook produced.
    let finder = Products::find()
        .filter(condition)
        .order_by_desc(Column::Favorite)
        .order_by_asc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let mut issues = Vec::new();
    if payload.product_name.trim().is_empty() {
        issues.push(FieldIssue::new("product_name", "Product name is required"));
    }
    if payload.price < 0 {
        issues.push(FieldIssue::new("price", "Price cannot be negative"));
    }
    if !issues.is_empty() {
        return Err(AppError::Validation(issues));
    }

    let id = Uuid::new_v4();
    let active = ActiveModel {
        id: Set(id),
        product_name: Set(capitalize_every_word(payload.product_name.trim())),
        category: Set(payload.category.as_str().to_string()),
        price: Set(payload.price),
        gen_price: Set(payload.gen_price),
        stock: Set(payload.stock),
        favorite: Set(payload.favorite),
        created_by: Set(user.user_id),
        created_at: NotSet,
        updated_by: Set(user.user_id),
        updated_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

// Partial merge: only fields present in the payload overwrite the stored
// row; everything else is preserved.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    if let Some(product_name) = payload.product_name {
        if product_name.trim().is_empty() {
            return Err(AppError::Validation(vec![FieldIssue::new(
                "product_name",
                "Product name is required",
            )]));
        }
        active.product_name = Set(capitalize_every_word(product_name.trim()));
    }
    if let Some(category) = payload.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(price) = payload.price {
        if price < 0 {
            return Err(AppError::Validation(vec![FieldIssue::new(
                "price",
                "Price cannot be negative",
            )]));
        }
        active.price = Set(price);
    }
    if let Some(gen_price) = payload.gen_price {
        active.gen_price = Set(Some(gen_price));
    }
    if let Some(stock) = payload.stock {
        active.stock = Set(Some(stock));
    }
    if let Some(favorite) = payload.favorite {
        active.favorite = Set(favorite);
    }
    active.updated_by = Set(user.user_id);
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
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

// All-or-nothing: one transaction for the whole id list. Ids that are
// already gone are not an error, so a repeated call is a no-op.
pub async fn delete_products(
    state: &AppState,
    user: &AuthUser,
    payload: BulkDeleteRequest,
) -> AppResult<ApiResponse<DeletedIds>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("No product ids supplied".into()));
    }

    let txn = state.orm.begin().await?;
    Products::delete_many()
        .filter(Column::Id.is_in(payload.ids.clone()))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_bulk_delete",
        Some("products"),
        Some(serde_json::json!({ "product_ids": payload.ids })),
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

pub fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        category: ProductCategory::parse(&model.category).unwrap_or(ProductCategory::Product),
        product_name: model.product_name,
        price: model.price,
        gen_price: model.gen_price,
        stock: model.stock,
        favorite: model.favorite,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
        updated_by: model.updated_by,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
