use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProductCategory {
    Service,
    Product,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Service => "Service",
            ProductCategory::Product => "Product",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Service" => Some(ProductCategory::Service),
            "Product" => Some(ProductCategory::Product),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Cash" => Some(PaymentMethod::Cash),
            "Card" => Some(PaymentMethod::Card),
            "Transfer" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Paid" => Some(PaymentStatus::Paid),
            "Pending" => Some(PaymentStatus::Pending),
            _ => None,
        }
    }
}

/// Catalog entry. Prices are stored in minor currency units (kobo).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub product_name: String,
    pub category: ProductCategory,
    pub price: i64,
    /// Alternate unit price applied while the site-wide generator toggle is on.
    pub gen_price: Option<i64>,
    pub stock: Option<i32>,
    pub favorite: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// A point-of-sale record. `total_cost`, `outstanding_balance` and
/// `payment_status` are recomputed together on every write.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: i64,
    pub total_cost: i64,
    pub paid: i64,
    pub outstanding_balance: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub customer_name: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

/// Invoice totals are a snapshot taken at creation; they are not recomputed
/// from the line items on read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_name: String,
    pub total_cost: i64,
    pub total_paid: i64,
    pub outstanding_balance: i64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_by: Uuid,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub position: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: i64,
    pub total_cost: i64,
}
