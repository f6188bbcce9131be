//! Catalog records.
//!
//! A [`Product`] is managed by a [`ResourceActor`](crate::actor_framework::ResourceActor);
//! see `product_actor` for the creation rules and the stock actions.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::checkout::round_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Dog,
    Cat,
    Bird,
    Fish,
    SmallPet,
    Reptile,
    Food,
    Accessory,
    Toy,
    Health,
    Grooming,
}

impl ProductCategory {
    /// Live animals are sold on deposit and travel only by pet-capable shipping.
    pub fn is_live_animal(self) -> bool {
        matches!(
            self,
            Self::Dog | Self::Cat | Self::Bird | Self::Fish | Self::SmallPet | Self::Reptile
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetGender {
    Male,
    Female,
}

/// Attributes only a live-animal listing carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProfile {
    pub breed: String,
    pub gender: PetGender,
    pub age_months: u32,
    pub vaccinations: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub base_price: Decimal,
    pub sale_price: Option<Decimal>,
    /// Whole percent taken off `base_price` when no sale price is set.
    pub discount_percent: Option<u8>,
    pub stock: u32,
    pub pet: Option<PetProfile>,
    pub images: Vec<String>,
    pub is_active: bool,
}

impl Product {
    /// Price a customer pays per unit today.
    ///
    /// A sale price wins when it undercuts the base price; otherwise the
    /// discount percent applies; otherwise the base price.
    pub fn effective_price(&self) -> Decimal {
        if let Some(sale) = self.sale_price.filter(|sale| *sale < self.base_price) {
            return sale;
        }
        match self.discount_percent {
            Some(percent) if percent > 0 => {
                let factor = Decimal::from(100 - u32::from(percent.min(100))) / Decimal::ONE_HUNDRED;
                round_money(self.base_price * factor)
            }
            _ => self.base_price,
        }
    }

    pub fn latest_vaccination(&self) -> Option<NaiveDate> {
        self.pet.as_ref().and_then(|pet| pet.vaccinations.iter().max().copied())
    }
}

/// Payload for creating a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: ProductCategory,
    pub base_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub discount_percent: Option<u8>,
    pub stock: u32,
    pub pet: Option<PetProfile>,
    pub images: Vec<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, category: ProductCategory, base_price: Decimal, stock: u32) -> Self {
        Self {
            name: name.into(),
            category,
            base_price,
            sale_price: None,
            discount_percent: None,
            stock,
            pet: None,
            images: Vec::new(),
        }
    }

    pub fn with_pet(mut self, pet: PetProfile) -> Self {
        self.pet = Some(pet);
        self
    }

    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_discount_percent(mut self, percent: u8) -> Self {
        self.discount_percent = Some(percent);
        self
    }
}

/// Admin edits. `Some(None)` clears an optional price field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub base_price: Option<Decimal>,
    pub sale_price: Option<Option<Decimal>>,
    pub discount_percent: Option<Option<u8>>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
