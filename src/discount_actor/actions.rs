use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::Discount;

#[derive(Debug, Clone)]
pub enum DiscountAction {
    /// Checks the code against a checkout without consuming a use.
    Validate { subtotal: Decimal, now: DateTime<Utc> },
    /// Validates and consumes one use in the same step.
    Redeem { subtotal: Decimal, now: DateTime<Utc> },
    /// Gives a use back when placement fails after redeeming.
    Restore,
    Deactivate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiscountActionResult {
    Valid(Discount),
    Redeemed(Discount),
    Restored,
    Deactivated,
}
