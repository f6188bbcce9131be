use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::checkout::{normalize_code, DiscountError};
use crate::discount_actor::{DiscountAction, DiscountActionResult};
use crate::domain::{Discount, DiscountCode, DiscountCodeCreate};

#[derive(Clone)]
pub struct DiscountClient {
    inner: ResourceClient<DiscountCode>,
}

impl_client_new!(DiscountClient, DiscountCode);

fn unexpected(result: DiscountActionResult) -> DiscountError {
    DiscountError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

impl DiscountClient {
    #[instrument(skip(self), fields(code = %code.code))]
    pub async fn create_code(&self, code: DiscountCodeCreate) -> Result<String, DiscountError> {
        debug!("Sending request");
        self.inner.create(code).await.map_err(|e| match e {
            crate::actor_framework::FrameworkError::AlreadyExists { id, .. } => DiscountError::AlreadyExists(id),
            other => DiscountError::from(other),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_code(&self, code: &str) -> Result<Option<DiscountCode>, DiscountError> {
        debug!("Sending request");
        Ok(self.inner.get(normalize_code(code)).await?)
    }

    /// Checks a code typed at checkout without consuming it.
    #[instrument(skip(self))]
    pub async fn validate_code(&self, code: &str, subtotal: Decimal) -> Result<Discount, DiscountError> {
        debug!("Sending request");
        let action = DiscountAction::Validate { subtotal, now: Utc::now() };
        match self.inner.perform_action(normalize_code(code), action).await? {
            DiscountActionResult::Valid(discount) => Ok(discount),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn redeem_code(&self, code: &str, subtotal: Decimal) -> Result<Discount, DiscountError> {
        debug!("Sending request");
        let action = DiscountAction::Redeem { subtotal, now: Utc::now() };
        match self.inner.perform_action(normalize_code(code), action).await? {
            DiscountActionResult::Redeemed(discount) => Ok(discount),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restore_code(&self, code: &str) -> Result<(), DiscountError> {
        debug!("Sending request");
        match self.inner.perform_action(normalize_code(code), DiscountAction::Restore).await? {
            DiscountActionResult::Restored => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn deactivate_code(&self, code: &str) -> Result<(), DiscountError> {
        debug!("Sending request");
        match self.inner.perform_action(normalize_code(code), DiscountAction::Deactivate).await? {
            DiscountActionResult::Deactivated => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}
