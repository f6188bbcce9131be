use super::OrderAnalysis;
use crate::domain::{ShippingEligibility, ShippingOption};

pub fn is_shipping_eligible(option: &ShippingOption, requires_deposit: bool) -> bool {
    match option.eligibility {
        ShippingEligibility::Any => true,
        ShippingEligibility::PetsOnly => requires_deposit,
        ShippingEligibility::NoPets => !requires_deposit,
    }
}

/// Delivery methods the customer may pick for this order, in catalog order.
pub fn filter_shipping_options(options: &[ShippingOption], analysis: &OrderAnalysis) -> Vec<ShippingOption> {
    options
        .iter()
        .filter(|option| is_shipping_eligible(option, analysis.requires_deposit))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{analyze_order, DepositPolicy};
    use crate::domain::{default_shipping_options, OrderItem, ProductCategory};
    use rust_decimal_macros::dec;

    fn analysis_for(category: ProductCategory) -> OrderAnalysis {
        let lines = [OrderItem {
            product_id: "p".into(),
            product_name: "p".into(),
            category,
            quantity: 1,
            unit_price: dec!(100),
        }];
        analyze_order(&lines, None, None, DepositPolicy::default())
    }

    fn ids(options: &[ShippingOption]) -> Vec<&str> {
        options.iter().map(|option| option.id.as_str()).collect()
    }

    #[test]
    fn test_supplies_exclude_pet_courier() {
        let options = filter_shipping_options(&default_shipping_options(), &analysis_for(ProductCategory::Toy));
        assert_eq!(ids(&options), vec!["pickup", "parcel", "express"]);
    }

    #[test]
    fn test_pets_exclude_parcel_services() {
        let options = filter_shipping_options(&default_shipping_options(), &analysis_for(ProductCategory::Bird));
        assert_eq!(ids(&options), vec!["pickup", "pet_courier"]);
    }
}
