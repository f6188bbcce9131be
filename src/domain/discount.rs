use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Whole or fractional percent off the goods subtotal.
    Percentage(Decimal),
    /// Flat amount off the goods subtotal, capped at the subtotal.
    Fixed(Decimal),
    FreeShipping,
}

/// Stored discount rule, keyed by its normalised code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: String,
    pub kind: DiscountKind,
    pub min_subtotal: Option<Decimal>,
    pub max_uses: Option<u32>,
    pub used_count: u32,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeCreate {
    pub code: String,
    pub kind: DiscountKind,
    pub min_subtotal: Option<Decimal>,
    pub max_uses: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl DiscountCodeCreate {
    pub fn new(code: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            code: code.into(),
            kind,
            min_subtotal: None,
            max_uses: None,
            expires_at: None,
        }
    }

    pub fn with_min_subtotal(mut self, min_subtotal: Decimal) -> Self {
        self.min_subtotal = Some(min_subtotal);
        self
    }

    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = Some(max_uses);
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// A code that passed validation for a particular checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub code: String,
    pub kind: DiscountKind,
}
