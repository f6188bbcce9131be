use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Discount, DiscountCode};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DiscountError {
    #[error("Discount code not found: {0}")]
    NotFound(String),
    #[error("Discount code already exists: {0}")]
    AlreadyExists(String),
    #[error("Discount code is no longer active: {0}")]
    Inactive(String),
    #[error("Discount code expired: {0}")]
    Expired(String),
    #[error("Order subtotal {subtotal} is below the minimum {minimum} for this code")]
    MinimumNotMet { minimum: Decimal, subtotal: Decimal },
    #[error("Discount code has reached its usage limit: {0}")]
    UsageExhausted(String),
    #[error("Discount validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Canonical form codes are stored and looked up in.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Checks a stored rule against a checkout and yields the discount to apply.
pub fn resolve_discount(
    rule: &DiscountCode,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Result<Discount, DiscountError> {
    if !rule.is_active {
        return Err(DiscountError::Inactive(rule.code.clone()));
    }
    if rule.expires_at.is_some_and(|expires_at| expires_at <= now) {
        return Err(DiscountError::Expired(rule.code.clone()));
    }
    if let Some(minimum) = rule.min_subtotal.filter(|minimum| subtotal < *minimum) {
        return Err(DiscountError::MinimumNotMet { minimum, subtotal });
    }
    if rule.max_uses.is_some_and(|max| rule.used_count >= max) {
        return Err(DiscountError::UsageExhausted(rule.code.clone()));
    }
    Ok(Discount {
        code: rule.code.clone(),
        kind: rule.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiscountKind;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn rule() -> DiscountCode {
        DiscountCode {
            code: "WOOF10".into(),
            kind: DiscountKind::Percentage(dec!(10)),
            min_subtotal: Some(dec!(500)),
            max_uses: Some(2),
            used_count: 0,
            expires_at: None,
            is_active: true,
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  woof10 \n"), "WOOF10");
    }

    #[test]
    fn test_valid_code_resolves() {
        let discount = resolve_discount(&rule(), dec!(500), Utc::now()).unwrap();
        assert_eq!(discount.code, "WOOF10");
        assert_eq!(discount.kind, DiscountKind::Percentage(dec!(10)));
    }

    #[test]
    fn test_rejections() {
        let now = Utc::now();

        let mut inactive = rule();
        inactive.is_active = false;
        assert_eq!(
            resolve_discount(&inactive, dec!(900), now),
            Err(DiscountError::Inactive("WOOF10".into()))
        );

        let mut expired = rule();
        expired.expires_at = Some(now - Duration::minutes(1));
        assert_eq!(
            resolve_discount(&expired, dec!(900), now),
            Err(DiscountError::Expired("WOOF10".into()))
        );

        assert_eq!(
            resolve_discount(&rule(), dec!(499.99), now),
            Err(DiscountError::MinimumNotMet { minimum: dec!(500), subtotal: dec!(499.99) })
        );

        let mut used_up = rule();
        used_up.used_count = 2;
        assert_eq!(
            resolve_discount(&used_up, dec!(900), now),
            Err(DiscountError::UsageExhausted("WOOF10".into()))
        );
    }
}
