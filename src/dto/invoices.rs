use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Invoice, InvoiceItem, PaymentMethod};

/// One basket line: a catalog product, a quantity, and an optional per-line
/// price override that beats both the base and the generator price.
#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub custom_price: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    pub items: Vec<InvoiceLineRequest>,
    #[serde(default)]
    pub total_paid: i64,
    pub payment_method: PaymentMethod,
    /// Site-wide "running on generator power" toggle at the time of sale.
    #[serde(default)]
    pub gen_is_on: bool,
}

/// Settlement update. Line items are a snapshot and cannot be edited.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SettleInvoiceRequest {
    pub total_paid: i64,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceWithItems {
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
}

#[derive(Serialize, ToSchema)]
pub struct InvoiceList {
    pub items: Vec<Invoice>,
}
