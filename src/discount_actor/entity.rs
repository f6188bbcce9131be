use rust_decimal::Decimal;

use super::actions::{DiscountAction, DiscountActionResult};
use crate::actor_framework::Entity;
use crate::checkout::{normalize_code, resolve_discount, DiscountError};
use crate::domain::{DiscountCode, DiscountCodeCreate, DiscountKind};

crate::impl_from_framework_error!(DiscountError);

impl Entity for DiscountCode {
    const KIND: &'static str = "discount code";
    type Id = String;
    type CreateParams = DiscountCodeCreate;
    type Patch = ();
    type Action = DiscountAction;
    type ActionResult = DiscountActionResult;
    type Error = DiscountError;

    fn id(&self) -> &String {
        &self.code
    }

    fn from_create_params(code: String, params: DiscountCodeCreate) -> Result<Self, DiscountError> {
        if code.is_empty() {
            return Err(DiscountError::ValidationError("code must not be empty".to_string()));
        }
        match params.kind {
            DiscountKind::Percentage(percent) if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED => {
                return Err(DiscountError::ValidationError(format!(
                    "percentage must be in (0, 100], got {}",
                    percent
                )));
            }
            DiscountKind::Fixed(amount) if amount <= Decimal::ZERO => {
                return Err(DiscountError::ValidationError(format!(
                    "fixed amount must be positive, got {}",
                    amount
                )));
            }
            _ => {}
        }
        Ok(Self {
            code,
            kind: params.kind,
            min_subtotal: params.min_subtotal,
            max_uses: params.max_uses,
            used_count: 0,
            expires_at: params.expires_at,
            is_active: true,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), DiscountError> {
        Ok(())
    }

    fn handle_action(&mut self, action: DiscountAction) -> Result<DiscountActionResult, DiscountError> {
        match action {
            DiscountAction::Validate { subtotal, now } => {
                resolve_discount(self, subtotal, now).map(DiscountActionResult::Valid)
            }
            DiscountAction::Redeem { subtotal, now } => {
                let discount = resolve_discount(self, subtotal, now)?;
                self.used_count += 1;
                Ok(DiscountActionResult::Redeemed(discount))
            }
            DiscountAction::Restore => {
                self.used_count = self.used_count.saturating_sub(1);
                Ok(DiscountActionResult::Restored)
            }
            DiscountAction::Deactivate => {
                self.is_active = false;
                Ok(DiscountActionResult::Deactivated)
            }
        }
    }
}

/// Id function for the discount actor: the normalised code.
pub fn discount_code_id(params: &DiscountCodeCreate) -> String {
    normalize_code(&params.code)
}
