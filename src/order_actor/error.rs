use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::DiscountError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: u32 },
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Unknown shipping option: {0}")]
    UnknownShipping(String),
    #[error("Shipping option {0} is not available for this order")]
    ShippingNotEligible(String),
    #[error("Prices changed since checkout preview: expected {expected}, now {actual}")]
    PriceChanged { expected: Decimal, actual: Decimal },
    #[error(transparent)]
    Discount(#[from] DiscountError),
    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Payment rejected: {0}")]
    PaymentRejected(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

crate::impl_from_framework_error!(OrderError);
