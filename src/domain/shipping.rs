use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Which orders a delivery method may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingEligibility {
    Any,
    /// Live-animal transport; offered only when the order contains a pet.
    PetsOnly,
    /// Parcel services that refuse live animals.
    NoPets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub eligibility: ShippingEligibility,
}

impl ShippingOption {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        eligibility: ShippingEligibility,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            eligibility,
        }
    }
}

/// Delivery methods the shop offers out of the box.
pub fn default_shipping_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption::new("pickup", "Store pickup", Decimal::ZERO, ShippingEligibility::Any),
        ShippingOption::new("parcel", "Standard parcel", dec!(50), ShippingEligibility::NoPets),
        ShippingOption::new("express", "Express parcel", dec!(90), ShippingEligibility::NoPets),
        ShippingOption::new("pet_courier", "Pet courier", dec!(350), ShippingEligibility::PetsOnly),
    ]
}
