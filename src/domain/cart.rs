use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CustomerContact;

/// One cart line as the storefront submits it. Prices are never taken from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Everything the checkout page posts when the customer confirms.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub contact: CustomerContact,
    pub shipping_option_id: Option<String>,
    pub discount_code: Option<String>,
    /// Total the customer saw in the preview; placement fails if prices moved.
    pub expected_total: Option<Decimal>,
}
