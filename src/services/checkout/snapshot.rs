use crate::entities::{cart, cart_item, product, product_variant, supplier};
use crate::errors::ServiceError;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use uuid::Uuid;

/// Raw row produced by the cart snapshot query. The supplier id is nullable
/// because the join chain is LEFT-joined: a dangling variant, product, or
/// supplier reference surfaces as NULL instead of silently dropping the line.
#[derive(Debug, Clone, FromQueryResult)]
struct CartLineRow {
    cart_item_id: Uuid,
    variant_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    discount_applied: Decimal,
    supplier_id: Option<Uuid>,
}

/// A cart line annotated with its resolved owning supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCartLine {
    pub cart_item_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_applied: Decimal,
    pub supplier_id: Uuid,
}

/// Looks up the user's cart. Each user has at most one.
pub async fn load_cart_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<cart::Model, ServiceError> {
    cart::Entity::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(ServiceError::CartNotFound(user_id))
}

/// Loads all cart lines for a cart joined through variant → product to the
/// owning supplier, ordered by line creation time for deterministic
/// partitioning downstream.
///
/// Any line whose chain does not resolve to an existing supplier is a
/// data-integrity fault and fails the whole load.
pub async fn load_cart_lines_with_supplier<C: ConnectionTrait>(
    db: &C,
    cart_id: Uuid,
) -> Result<Vec<ResolvedCartLine>, ServiceError> {
    let rows = cart_item::Entity::find()
        .filter(cart_item::Column::CartId.eq(cart_id))
        .join(JoinType::LeftJoin, cart_item::Relation::ProductVariant.def())
        .join(JoinType::LeftJoin, product_variant::Relation::Product.def())
        .join(JoinType::LeftJoin, product::Relation::Supplier.def())
        .select_only()
        .column_as(cart_item::Column::Id, "cart_item_id")
        .column(cart_item::Column::VariantId)
        .column(cart_item::Column::Quantity)
        .column(cart_item::Column::UnitPrice)
        .column(cart_item::Column::DiscountApplied)
        .column_as(supplier::Column::Id, "supplier_id")
        .order_by_asc(cart_item::Column::CreatedAt)
        .order_by_asc(cart_item::Column::Id)
        .into_model::<CartLineRow>()
        .all(db)
        .await?;

    rows.into_iter()
        .map(|row| {
            let supplier_id = row.supplier_id.ok_or_else(|| {
                ServiceError::IntegrityFault(format!(
                    "cart line {} references a missing variant, product, or supplier",
                    row.cart_item_id
                ))
            })?;
            Ok(ResolvedCartLine {
                cart_item_id: row.cart_item_id,
                variant_id: row.variant_id,
                quantity: row.quantity,
                unit_price: row.unit_price,
                discount_applied: row.discount_applied,
                supplier_id,
            })
        })
        .collect()
}
