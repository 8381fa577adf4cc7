use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order entity: the root aggregate produced by one successful checkout.
///
/// `grand_total` is server-computed and immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub payment_id: Uuid,
    pub shipping_line1: String,
    #[sea_orm(nullable)]
    pub shipping_line2: Option<String>,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub grand_total: Decimal,
    pub ordered_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::supplier_order::Entity")]
    SupplierOrders,
}

impl Related<super::supplier_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
