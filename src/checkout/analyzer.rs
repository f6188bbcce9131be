use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::round_money;
use crate::domain::{Discount, DiscountKind, OrderItem, PaymentType, ShippingOption};

/// Share of the total collected up front on live-animal orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositPolicy {
    pub percent: Decimal,
}

impl Default for DepositPolicy {
    fn default() -> Self {
        Self { percent: dec!(10) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderAnalysis {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub shipping_fee: Decimal,
    pub free_shipping: bool,
    pub total: Decimal,
    pub requires_deposit: bool,
    pub payment_type: PaymentType,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
}

pub fn subtotal(lines: &[OrderItem]) -> Decimal {
    lines.iter().map(OrderItem::line_total).sum()
}

pub fn contains_live_animals(lines: &[OrderItem]) -> bool {
    lines.iter().any(|line| line.category.is_live_animal())
}

/// Amount a discount takes off the goods subtotal. Free shipping takes nothing
/// off the goods; it waives the fee instead.
pub fn discount_amount(kind: DiscountKind, subtotal: Decimal) -> Decimal {
    let amount = match kind {
        DiscountKind::Percentage(percent) => {
            round_money(subtotal * percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED)
        }
        DiscountKind::Fixed(amount) => amount.max(Decimal::ZERO),
        DiscountKind::FreeShipping => Decimal::ZERO,
    };
    amount.min(subtotal)
}

/// Prices an order from already-priced lines.
///
/// Orders containing a live animal are deposit orders: `policy.percent` of the
/// total is due now and the rest on pickup. Everything else is paid in full.
pub fn analyze_order(
    lines: &[OrderItem],
    discount: Option<&Discount>,
    shipping: Option<&ShippingOption>,
    policy: DepositPolicy,
) -> OrderAnalysis {
    let subtotal = subtotal(lines);
    let discount_amount = discount.map_or(Decimal::ZERO, |d| discount_amount(d.kind, subtotal));
    let free_shipping = matches!(discount, Some(Discount { kind: DiscountKind::FreeShipping, .. }));
    let shipping_fee = match shipping {
        Some(_) if free_shipping => Decimal::ZERO,
        Some(option) => option.price,
        None => Decimal::ZERO,
    };
    let total = (subtotal - discount_amount + shipping_fee).max(Decimal::ZERO);

    let requires_deposit = contains_live_animals(lines);
    let (payment_type, deposit_amount, remaining_amount) = if requires_deposit {
        let deposit = round_money(total * policy.percent / Decimal::ONE_HUNDRED);
        (PaymentType::Deposit, deposit, total - deposit)
    } else {
        (PaymentType::Full, total, Decimal::ZERO)
    };

    OrderAnalysis {
        subtotal,
        discount_amount,
        shipping_fee,
        free_shipping,
        total,
        requires_deposit,
        payment_type,
        deposit_amount,
        remaining_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductCategory, ShippingEligibility};

    fn line(category: ProductCategory, unit_price: Decimal, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: format!("{:?}", category).to_lowercase(),
            product_name: format!("{:?}", category),
            category,
            quantity,
            unit_price,
        }
    }

    fn parcel() -> ShippingOption {
        ShippingOption::new("parcel", "Standard parcel", dec!(50), ShippingEligibility::NoPets)
    }

    fn code(kind: DiscountKind) -> Discount {
        Discount { code: "PROMO".into(), kind }
    }

    #[test]
    fn test_supplies_only_order_is_paid_in_full() {
        let lines = [line(ProductCategory::Food, dec!(250), 2), line(ProductCategory::Toy, dec!(89.50), 1)];
        let analysis = analyze_order(&lines, None, Some(&parcel()), DepositPolicy::default());

        assert_eq!(analysis.subtotal, dec!(589.50));
        assert_eq!(analysis.shipping_fee, dec!(50));
        assert_eq!(analysis.total, dec!(639.50));
        assert!(!analysis.requires_deposit);
        assert_eq!(analysis.payment_type, PaymentType::Full);
        assert_eq!(analysis.deposit_amount, dec!(639.50));
        assert_eq!(analysis.remaining_amount, Decimal::ZERO);
    }

    #[test]
    fn test_pet_order_splits_deposit() {
        let lines = [line(ProductCategory::Dog, dec!(15000), 1), line(ProductCategory::Food, dec!(333.33), 1)];
        let analysis = analyze_order(&lines, None, None, DepositPolicy::default());

        assert!(analysis.requires_deposit);
        assert_eq!(analysis.payment_type, PaymentType::Deposit);
        assert_eq!(analysis.total, dec!(15333.33));
        assert_eq!(analysis.deposit_amount, dec!(1533.33));
        assert_eq!(analysis.remaining_amount, dec!(13800.00));
    }

    #[test]
    fn test_custom_deposit_percent() {
        let lines = [line(ProductCategory::Cat, dec!(8000), 1)];
        let analysis = analyze_order(&lines, None, None, DepositPolicy { percent: dec!(25) });
        assert_eq!(analysis.deposit_amount, dec!(2000));
        assert_eq!(analysis.remaining_amount, dec!(6000));
    }

    #[test]
    fn test_percentage_discount_rounds_to_satang() {
        let lines = [line(ProductCategory::Grooming, dec!(199), 1)];
        let discount = code(DiscountKind::Percentage(dec!(12.5)));
        let analysis = analyze_order(&lines, Some(&discount), None, DepositPolicy::default());
        assert_eq!(analysis.discount_amount, dec!(24.88));
        assert_eq!(analysis.total, dec!(174.12));
    }

    #[test]
    fn test_fixed_discount_is_capped_at_subtotal() {
        let lines = [line(ProductCategory::Toy, dec!(60), 1)];
        let discount = code(DiscountKind::Fixed(dec!(100)));
        let analysis = analyze_order(&lines, Some(&discount), Some(&parcel()), DepositPolicy::default());
        assert_eq!(analysis.discount_amount, dec!(60));
        assert_eq!(analysis.total, dec!(50));
    }

    #[test]
    fn test_free_shipping_waives_fee_only() {
        let lines = [line(ProductCategory::Food, dec!(400), 1)];
        let discount = code(DiscountKind::FreeShipping);
        let analysis = analyze_order(&lines, Some(&discount), Some(&parcel()), DepositPolicy::default());
        assert!(analysis.free_shipping);
        assert_eq!(analysis.discount_amount, Decimal::ZERO);
        assert_eq!(analysis.shipping_fee, Decimal::ZERO);
        assert_eq!(analysis.total, dec!(400));
    }

    #[test]
    fn test_empty_lines_price_to_zero() {
        let analysis = analyze_order(&[], None, None, DepositPolicy::default());
        assert_eq!(analysis.total, Decimal::ZERO);
        assert_eq!(analysis.payment_type, PaymentType::Full);
    }
}
