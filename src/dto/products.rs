use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, ProductCategory};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub product_name: String,
    pub category: ProductCategory,
    pub price: i64,
    pub gen_price: Option<i64>,
    pub stock: Option<i32>,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<i64>,
    pub gen_price: Option<i64>,
    pub stock: Option<i32>,
    pub favorite: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedIds {
    pub ids: Vec<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
