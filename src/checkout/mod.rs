//! Pure order arithmetic shared by the checkout preview and order placement.
//!
//! Nothing in here talks to an actor: callers load prices and rules first and
//! hand plain values in, so the storefront preview and the server-side
//! re-validation always agree.

mod analyzer;
mod discount;
mod order_number;
mod shipping;

pub use analyzer::*;
pub use discount::*;
pub use order_number::*;
pub use shipping::*;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a money amount to satang, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
