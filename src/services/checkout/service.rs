use crate::{
    entities::{cart_item, order, order_item, supplier_order, SupplierOrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use super::partition::partition_by_supplier;
use super::snapshot::{load_cart_by_user, load_cart_lines_with_supplier};
use super::totals::compute_totals;

/// The client-claimed grand total accompanying a checkout request.
///
/// Modeled as a sum type so the two reconciliation paths are explicit: a
/// provided total must match the computed one exactly, an omitted total means
/// the computed value is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimedTotal {
    Provided(Decimal),
    Omitted,
}

impl From<Option<Decimal>> for ClaimedTotal {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(total) => Self::Provided(total),
            None => Self::Omitted,
        }
    }
}

/// Shipping destination captured on the order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShippingDestination {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Input to one checkout call.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: Uuid,
    pub claimed_total: ClaimedTotal,
    pub destination: ShippingDestination,
    pub payment_id: Uuid,
}

/// Summary returned after a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSummary {
    pub order_id: Uuid,
    pub grand_total: Decimal,
    pub supplier_order_ids: Vec<Uuid>,
    pub items_count: usize,
}

/// Checkout service: converts a user's cart into a persisted order aggregate.
///
/// The write phase (order + supplier orders + order items + cart clearing) is
/// one database transaction; it commits everything or nothing.
#[derive(Clone)]
pub struct CheckoutService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl CheckoutService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Runs the full checkout for one user.
    ///
    /// Fails with `CartNotFound` if the user has no cart, `EmptyCart` if the
    /// cart has no lines, `TotalMismatch` if a claimed total disagrees with
    /// the computed one, and `IntegrityFault` if any line's supplier chain is
    /// dangling. No partial state survives any failure.
    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutSummary, ServiceError> {
        // Reads happen outside the write transaction; a same-user race is
        // serialized by the store and the loser observes an empty cart.
        let cart = load_cart_by_user(&*self.db, request.user_id).await?;

        let lines = load_cart_lines_with_supplier(&*self.db, cart.id).await?;
        if lines.is_empty() {
            return Err(ServiceError::EmptyCart(cart.id));
        }

        let groups = partition_by_supplier(lines);
        let totals = compute_totals(&groups);

        if let ClaimedTotal::Provided(received) = request.claimed_total {
            if received != totals.grand_total {
                return Err(ServiceError::TotalMismatch {
                    expected: totals.grand_total,
                    received,
                });
            }
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();

        let txn = self.db.begin().await?;

        order::ActiveModel {
            id: Set(order_id),
            user_id: Set(request.user_id),
            payment_id: Set(request.payment_id),
            shipping_line1: Set(request.destination.line1.clone()),
            shipping_line2: Set(request.destination.line2.clone()),
            shipping_city: Set(request.destination.city.clone()),
            shipping_postal_code: Set(request.destination.postal_code.clone()),
            shipping_country: Set(request.destination.country.clone()),
            grand_total: Set(totals.grand_total),
            ordered_at: Set(now),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut supplier_order_ids = Vec::with_capacity(groups.len());
        let mut items_count = 0usize;

        for (group, supplier_totals) in groups.iter().zip(&totals.per_supplier) {
            let supplier_order_id = Uuid::new_v4();

            supplier_order::ActiveModel {
                id: Set(supplier_order_id),
                order_id: Set(order_id),
                supplier_id: Set(group.supplier_id),
                order_number: Set(generate_order_number()),
                subtotal: Set(supplier_totals.subtotal),
                shipping_fee: Set(supplier_totals.shipping_fee),
                total_price: Set(supplier_totals.total_price),
                status: Set(SupplierOrderStatus::Pending),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;

            for line in &group.lines {
                order_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    supplier_order_id: Set(supplier_order_id),
                    variant_id: Set(line.variant_id),
                    quantity: Set(line.quantity),
                    unit_price: Set(line.unit_price),
                    discount_applied: Set(line.discount_applied),
                    created_at: Set(now),
                }
                .insert(&txn)
                .await?;
                items_count += 1;
            }

            supplier_order_ids.push(supplier_order_id);
        }

        // The cart row itself is retained; only its lines are consumed.
        // The snapshot was read outside this transaction, so the delete count
        // must match it: a shortfall means a concurrent checkout already
        // drained this cart, and committing would duplicate the order.
        let deleted = cart_item::Entity::delete_many()
            .filter(cart_item::Column::CartId.eq(cart.id))
            .exec(&txn)
            .await?;
        if deleted.rows_affected != items_count as u64 {
            txn.rollback().await?;
            return Err(ServiceError::EmptyCart(cart.id));
        }

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CheckoutCompleted {
                order_id,
                user_id: request.user_id,
                grand_total: totals.grand_total,
                supplier_order_ids: supplier_order_ids.clone(),
                completed_at: now,
            })
            .await;
        self.event_sender
            .send_or_log(Event::OrderCreated(order_id))
            .await;
        self.event_sender
            .send_or_log(Event::CartCleared(cart.id))
            .await;

        info!(
            %order_id,
            grand_total = %totals.grand_total,
            supplier_orders = supplier_order_ids.len(),
            items = items_count,
            "Checkout completed"
        );

        Ok(CheckoutSummary {
            order_id,
            grand_total: totals.grand_total,
            supplier_order_ids,
            items_count,
        })
    }
}

/// Generates a globally unique supplier-order number. The format is opaque to
/// callers; uniqueness is the only contract.
fn generate_order_number() -> String {
    format!("SO-{}", Uuid::new_v4().simple().to_string().to_uppercase())
}
