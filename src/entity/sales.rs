use sea_orm::entity::prelude::*;

// product_name is denormalized on purpose: a sale records what was sold at
// the time, not a live catalog reference.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: i64,
    pub total_cost: i64,
    pub paid: i64,
    pub outstanding_balance: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub customer_name: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_by: Uuid,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
