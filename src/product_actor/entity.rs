use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

fn validate_name(name: &str) -> Result<String, ProductError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProductError::ValidationError("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn validate_pricing(
    base_price: Decimal,
    sale_price: Option<Decimal>,
    discount_percent: Option<u8>,
) -> Result<(), ProductError> {
    if base_price <= Decimal::ZERO {
        return Err(ProductError::ValidationError(format!("base price must be positive, got {}", base_price)));
    }
    if sale_price.is_some_and(|sale| sale <= Decimal::ZERO) {
        return Err(ProductError::ValidationError("sale price must be positive".to_string()));
    }
    if discount_percent.is_some_and(|percent| percent > 100) {
        return Err(ProductError::ValidationError("discount percent must be at most 100".to_string()));
    }
    Ok(())
}

impl Entity for Product {
    const KIND: &'static str = "product";
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a catalog entry. Pet profiles are only accepted on live-animal categories.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        let name = validate_name(&params.name)?;
        validate_pricing(params.base_price, params.sale_price, params.discount_percent)?;
        if params.pet.is_some() && !params.category.is_live_animal() {
            return Err(ProductError::ValidationError(format!(
                "pet profile given for non-animal category {:?}",
                params.category
            )));
        }
        Ok(Self {
            id,
            name,
            category: params.category,
            base_price: params.base_price,
            sale_price: params.sale_price,
            discount_percent: params.discount_percent,
            stock: params.stock,
            pet: params.pet,
            images: params.images,
            is_active: true,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let base_price = patch.base_price.unwrap_or(self.base_price);
        let sale_price = patch.sale_price.unwrap_or(self.sale_price);
        let discount_percent = patch.discount_percent.unwrap_or(self.discount_percent);
        validate_pricing(base_price, sale_price, discount_percent)?;

        if let Some(name) = name {
            self.name = name;
        }
        self.base_price = base_price;
        self.sale_price = sale_price;
        self.discount_percent = discount_percent;
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(_) if !self.is_active => Err(ProductError::Inactive(self.id.clone())),
            ProductAction::ReserveStock(amount) => {
                if self.stock < amount {
                    return Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
            ProductAction::ReleaseStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PetGender, PetProfile, ProductCategory};
    use rust_decimal_macros::dec;

    fn food() -> Product {
        Product::from_create_params("product_1".into(), ProductCreate::new("Kibble", ProductCategory::Food, dec!(250), 3))
            .unwrap()
    }

    #[test]
    fn test_reserve_and_release() {
        let mut product = food();
        assert_eq!(product.handle_action(ProductAction::ReserveStock(2)), Ok(ProductActionResult::ReserveStock(1)));
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)),
            Err(ProductError::InsufficientStock { requested: 2, available: 1 })
        );
        assert_eq!(product.handle_action(ProductAction::ReleaseStock(2)), Ok(ProductActionResult::ReleaseStock(3)));
        assert_eq!(product.handle_action(ProductAction::ReserveStock(0)), Err(ProductError::InvalidQuantity(0)));
    }

    #[test]
    fn test_inactive_products_cannot_be_reserved() {
        let mut product = food();
        product
            .on_update(ProductPatch { is_active: Some(false), ..Default::default() })
            .unwrap();
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(1)),
            Err(ProductError::Inactive("product_1".into()))
        );
    }

    #[test]
    fn test_pet_profile_requires_animal_category() {
        let profile = PetProfile {
            breed: "Shiba Inu".into(),
            gender: PetGender::Male,
            age_months: 3,
            vaccinations: vec![],
        };
        let toy = ProductCreate::new("Rope toy", ProductCategory::Toy, dec!(120), 10).with_pet(profile.clone());
        assert!(matches!(
            Product::from_create_params("product_2".into(), toy),
            Err(ProductError::ValidationError(_))
        ));

        let puppy = ProductCreate::new("Shiba puppy", ProductCategory::Dog, dec!(35000), 1).with_pet(profile);
        assert!(Product::from_create_params("product_3".into(), puppy).is_ok());
    }

    #[test]
    fn test_patch_trims_and_rejects_blank_names() {
        let mut product = food();
        product
            .on_update(ProductPatch { name: Some("  Kibble 5kg ".into()), ..Default::default() })
            .unwrap();
        assert_eq!(product.name, "Kibble 5kg");

        let blank = ProductPatch {
            name: Some("   ".into()),
            stock: Some(99),
            ..Default::default()
        };
        assert!(matches!(product.on_update(blank), Err(ProductError::ValidationError(_))));
        assert_eq!(product.name, "Kibble 5kg");
        assert_eq!(product.stock, 3);
    }

    #[test]
    fn test_patch_rejects_bad_pricing_without_partial_writes() {
        let mut product = food();
        let patch = ProductPatch {
            name: Some("Renamed".into()),
            discount_percent: Some(Some(120)),
            ..Default::default()
        };
        assert!(product.on_update(patch).is_err());
        assert_eq!(product.name, "Kibble");
    }
}
