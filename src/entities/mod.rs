/// Marketplace entities
pub mod cart;
pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_variant;
pub mod supplier;
pub mod supplier_order;

// Re-export entities
pub use cart::{Entity as Cart, Model as CartModel};
pub use cart_item::{Entity as CartItem, Model as CartItemModel};
pub use order::{Entity as Order, Model as OrderModel};
pub use order_item::{Entity as OrderItem, Model as OrderItemModel};
pub use product::{Entity as Product, Model as ProductModel};
pub use product_variant::{Entity as ProductVariant, Model as ProductVariantModel};
pub use supplier::{Entity as Supplier, Model as SupplierModel};
pub use supplier_order::{Entity as SupplierOrder, Model as SupplierOrderModel, SupplierOrderStatus};
