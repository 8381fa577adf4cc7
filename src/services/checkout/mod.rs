//! Checkout: converting a user's cart into a persisted order split per
//! supplier, with server-computed totals, executed as one atomic unit.

pub mod partition;
pub mod service;
pub mod snapshot;
pub mod totals;

pub use partition::{partition_by_supplier, SupplierGroup};
pub use service::{
    CheckoutRequest, CheckoutService, CheckoutSummary, ClaimedTotal, ShippingDestination,
};
pub use snapshot::{load_cart_by_user, load_cart_lines_with_supplier, ResolvedCartLine};
pub use totals::{compute_totals, round_money, CheckoutTotals, SupplierTotals, SHIPPING_FEE};
