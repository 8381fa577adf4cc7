pub mod checkout;
pub mod health;

pub use checkout::checkout_routes;
pub use health::health_routes;
