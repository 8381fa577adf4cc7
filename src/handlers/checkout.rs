use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    errors::ServiceError,
    services::checkout::{CheckoutRequest, ShippingDestination},
    ApiResponse, AppState,
};

/// Checkout request payload.
///
/// `total` is optional: when present it must match the server-computed grand
/// total exactly, when absent the computed value is authoritative.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutPayload {
    pub user_id: Uuid,
    #[serde(default)]
    pub total: Option<Decimal>,
    pub shipping_address: ShippingDestination,
    pub payment_id: Uuid,
}

pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/", post(create_checkout))
}

async fn create_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_payload(&payload)?;

    let request = CheckoutRequest {
        user_id: payload.user_id,
        claimed_total: payload.total.into(),
        destination: payload.shipping_address,
        payment_id: payload.payment_id,
    };

    let summary = state.checkout_service.checkout(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(summary))))
}

fn validate_payload(payload: &CheckoutPayload) -> Result<(), ServiceError> {
    let addr = &payload.shipping_address;
    if addr.line1.trim().is_empty()
        || addr.city.trim().is_empty()
        || addr.postal_code.trim().is_empty()
        || addr.country.trim().is_empty()
    {
        return Err(ServiceError::ValidationError(
            "shipping_address fields must not be empty".to_string(),
        ));
    }
    if let Some(total) = payload.total {
        if total.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "total must not be negative".to_string(),
            ));
        }
    }
    Ok(())
}
