//! Mercato API Library
//!
//! Multi-supplier marketplace backend. The core of the system is the checkout
//! flow: converting a user's cart into an order split per supplier, with
//! server-computed totals, persisted atomically.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::Router;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

use services::checkout::CheckoutService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub checkout_service: Arc<CheckoutService>,
}

impl AppState {
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        let checkout_service = Arc::new(CheckoutService::new(
            db.clone(),
            Arc::new(event_sender.clone()),
        ));
        Self {
            db,
            config,
            event_sender,
            checkout_service,
        }
    }
}

// Common response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Builds the application router with all routes and shared layers.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health_routes())
        .nest("/api/v1/checkout", handlers::checkout_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
