use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use mercato_api::{
    config::AppConfig,
    db,
    entities::{cart, cart_item, product, product_variant, supplier},
    events::{self, EventSender},
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Helper harness spinning up application state backed by an in-memory
/// SQLite database with migrations applied.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        // A pool larger than one would hand each connection its own
        // in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        Self::from_config(cfg).await
    }

    /// Construct a test application over a file-backed database with a
    /// multi-connection pool, so calls can genuinely run concurrently.
    pub async fn new_file_backed(db_file: &str) -> Self {
        let _ = std::fs::remove_file(db_file);

        let mut cfg = AppConfig::new(
            format!("sqlite://{db_file}?mode=rwc"),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );
        cfg.db_max_connections = 5;
        cfg.db_min_connections = 1;

        Self::from_config(cfg).await
    }

    async fn from_config(cfg: AppConfig) -> Self {
        let db_pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("test database");
        db::run_migrations(&db_pool).await.expect("migrations");

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(Arc::new(db_pool), cfg, event_sender);
        let router = mercato_api::app_router(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Inserts a supplier row.
    pub async fn seed_supplier(&self, name: &str) -> Uuid {
        let supplier_id = Uuid::new_v4();
        supplier::ActiveModel {
            id: Set(supplier_id),
            name: Set(name.to_string()),
            contact_email: Set(None),
            active: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed supplier");
        supplier_id
    }

    /// Inserts a product owned by the given supplier.
    pub async fn seed_product(&self, supplier_id: Uuid, name: &str) -> Uuid {
        let product_id = Uuid::new_v4();
        product::ActiveModel {
            id: Set(product_id),
            supplier_id: Set(supplier_id),
            name: Set(name.to_string()),
            description: Set(None),
            active: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed product");
        product_id
    }

    /// Inserts a variant for the given product.
    pub async fn seed_variant(&self, product_id: Uuid, sku: &str, price: Decimal) -> Uuid {
        let variant_id = Uuid::new_v4();
        product_variant::ActiveModel {
            id: Set(variant_id),
            product_id: Set(product_id),
            sku: Set(sku.to_string()),
            price: Set(price),
            discount: Set(Decimal::ZERO),
            stock: Set(100),
            active: Set(true),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed variant");
        variant_id
    }

    /// Convenience: supplier + product + variant in one call.
    pub async fn seed_supplier_variant(&self, sku: &str, price: Decimal) -> (Uuid, Uuid) {
        let supplier_id = self.seed_supplier(&format!("Supplier {sku}")).await;
        let product_id = self.seed_product(supplier_id, &format!("Product {sku}")).await;
        let variant_id = self.seed_variant(product_id, sku, price).await;
        (supplier_id, variant_id)
    }

    /// Inserts a cart for the given user.
    pub async fn seed_cart(&self, user_id: Uuid) -> Uuid {
        let cart_id = Uuid::new_v4();
        cart::ActiveModel {
            id: Set(cart_id),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed cart");
        cart_id
    }

    /// Inserts a cart line with captured pricing.
    pub async fn seed_cart_item(
        &self,
        cart_id: Uuid,
        variant_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        discount_applied: Decimal,
    ) -> Uuid {
        let item_id = Uuid::new_v4();
        cart_item::ActiveModel {
            id: Set(item_id),
            cart_id: Set(cart_id),
            variant_id: Set(variant_id),
            quantity: Set(quantity),
            unit_price: Set(unit_price),
            discount_applied: Set(discount_applied),
            priced_at: Set(Utc::now()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed cart item");
        item_id
    }
}
