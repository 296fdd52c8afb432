use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{PaymentMethod, Sale};

// total_cost, outstanding_balance and payment_status are derived server-side
// on every write; they are never accepted from the client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: i64,
    #[serde(default)]
    pub paid: i64,
    pub payment_method: PaymentMethod,
    pub customer_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSaleRequest {
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub unit_cost: Option<i64>,
    pub paid: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    pub customer_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Serialize, ToSchema)]
pub struct SaleList {
    pub items: Vec<Sale>,
}
