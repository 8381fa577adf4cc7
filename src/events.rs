use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Events emitted by the marketplace core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// A checkout completed and produced an order.
    CheckoutCompleted {
        order_id: Uuid,
        user_id: Uuid,
        grand_total: Decimal,
        supplier_order_ids: Vec<Uuid>,
        completed_at: DateTime<Utc>,
    },
    OrderCreated(Uuid),
    CartCleared(Uuid),
}

/// Cloneable handle for publishing events onto the application channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing if the channel is closed.
    /// Event delivery is best-effort; it never fails a committed checkout.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping event: {}", e);
        }
    }
}

/// Background loop draining the application event channel.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::CheckoutCompleted {
                order_id,
                user_id,
                grand_total,
                supplier_order_ids,
                ..
            } => {
                info!(
                    %order_id,
                    %user_id,
                    %grand_total,
                    supplier_orders = supplier_order_ids.len(),
                    "Checkout completed"
                );
            }
            Event::OrderCreated(order_id) => {
                info!(%order_id, "Order created");
            }
            Event::CartCleared(cart_id) => {
                info!(%cart_id, "Cart cleared");
            }
        }
    }

    info!("Event processing loop stopped");
}
