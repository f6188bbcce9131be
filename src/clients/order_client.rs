use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::checkout::{
    analyze_order, contains_live_animals, filter_shipping_options, is_shipping_eligible, subtotal, DepositPolicy,
    OrderAnalysis, OrderNumberGenerator,
};
use crate::clients::{DiscountClient, ProductClient, UserClient};
use crate::domain::{
    CartItem, CheckoutRequest, Discount, Order, OrderCreate, OrderItem, OrderStatus, PaymentNotification,
    ShippingOption, User,
};
use crate::notify::ReceiptDispatcher;
use crate::order_actor::{OrderAction, OrderError};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

/// Shop-wide checkout rules the order client prices against.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub shipping_options: Vec<ShippingOption>,
    pub deposit_policy: DepositPolicy,
}

/// What the checkout page shows before the customer confirms.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutPreview {
    pub items: Vec<OrderItem>,
    pub discount: Option<Discount>,
    pub analysis: OrderAnalysis,
    /// Delivery methods the customer may still choose for this cart.
    pub shipping_options: Vec<ShippingOption>,
}

/// Client for the Order actor.
///
/// Placement is orchestrated here rather than inside the actor: the client
/// validates the user, prices the cart from the catalog, reserves stock,
/// redeems the discount and only then asks the actor to store the order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    discount_client: DiscountClient,
    dispatcher: ReceiptDispatcher,
    order_numbers: Arc<OrderNumberGenerator>,
    settings: Arc<CheckoutSettings>,
}

fn product_to_order_error(product_id: &str, err: ProductError) -> OrderError {
    match err {
        ProductError::NotFound(_) | ProductError::Inactive(_) => OrderError::InvalidProduct(product_id.to_string()),
        ProductError::InsufficientStock { .. } => OrderError::InsufficientStock(format!("{}: {}", product_id, err)),
        ProductError::InvalidQuantity(quantity) => OrderError::InvalidQuantity {
            product_id: product_id.to_string(),
            quantity,
        },
        other => OrderError::ActorCommunicationError(other.to_string()),
    }
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
        discount_client: DiscountClient,
        dispatcher: ReceiptDispatcher,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            discount_client,
            dispatcher,
            order_numbers: Arc::new(OrderNumberGenerator::new()),
            settings: Arc::new(settings),
        }
    }

    async fn load_user(&self, user_id: &str) -> Result<User, OrderError> {
        match self.user_client.get_user(user_id.to_string()).await {
            Ok(Some(user)) => {
                debug!(user_name = %user.name, "User validation successful");
                Ok(user)
            }
            Ok(None) => {
                error!(user_id, "User not found");
                Err(OrderError::InvalidUser(user_id.to_string()))
            }
            Err(UserError::ActorCommunicationError(e)) => Err(OrderError::ActorCommunicationError(e)),
            Err(e) => Err(OrderError::InvalidUser(format!("User validation failed: {}", e))),
        }
    }

    /// Snapshots catalog prices for every cart line.
    async fn price_lines(&self, items: &[CartItem]) -> Result<Vec<OrderItem>, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id.clone(),
                    quantity: 0,
                });
            }
            let product = self
                .product_client
                .get_product(item.product_id.clone())
                .await
                .map_err(|e| product_to_order_error(&item.product_id, e))?
                .filter(|product| product.is_active)
                .ok_or_else(|| OrderError::InvalidProduct(item.product_id.clone()))?;
            lines.push(OrderItem {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                category: product.category,
                quantity: item.quantity,
                unit_price: product.effective_price(),
            });
        }
        Ok(lines)
    }

    fn select_shipping(
        &self,
        shipping_option_id: Option<&str>,
        requires_deposit: bool,
    ) -> Result<Option<ShippingOption>, OrderError> {
        let Some(id) = shipping_option_id else {
            return Ok(None);
        };
        let option = self
            .settings
            .shipping_options
            .iter()
            .find(|option| option.id == id)
            .ok_or_else(|| OrderError::UnknownShipping(id.to_string()))?;
        if !is_shipping_eligible(option, requires_deposit) {
            return Err(OrderError::ShippingNotEligible(id.to_string()));
        }
        Ok(Some(option.clone()))
    }

    /// Prices the request exactly as placement would, without reserving anything.
    async fn price_request(
        &self,
        request: &CheckoutRequest,
    ) -> Result<(Vec<OrderItem>, Option<Discount>, OrderAnalysis), OrderError> {
        let lines = self.price_lines(&request.items).await?;
        let discount = match request.discount_code.as_deref() {
            Some(code) => Some(self.discount_client.validate_code(code, subtotal(&lines)).await?),
            None => None,
        };
        let requires_deposit = contains_live_animals(&lines);
        let shipping = self.select_shipping(request.shipping_option_id.as_deref(), requires_deposit)?;
        let analysis = analyze_order(
            &lines,
            discount.as_ref(),
            shipping.as_ref(),
            self.settings.deposit_policy,
        );
        Ok((lines, discount, analysis))
    }

    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn preview_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutPreview, OrderError> {
        debug!("Pricing checkout preview");
        let (items, discount, analysis) = self.price_request(request).await?;
        let shipping_options = filter_shipping_options(&self.settings.shipping_options, &analysis);
        Ok(CheckoutPreview {
            items,
            discount,
            analysis,
            shipping_options,
        })
    }

    /// Undoes the side effects of a placement that failed halfway.
    async fn roll_back(&self, reserved: &[(String, u32)], redeemed_code: Option<&str>) {
        for (product_id, quantity) in reserved {
            if let Err(e) = self.product_client.release_stock(product_id.clone(), *quantity).await {
                error!(product_id = %product_id, quantity, error = %e, "Failed to release reserved stock");
            }
        }
        if let Some(code) = redeemed_code {
            if let Err(e) = self.discount_client.restore_code(code).await {
                error!(code, error = %e, "Failed to restore discount use");
            }
        }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, items = request.items.len()))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<Order, OrderError> {
        info!("Processing place_order request");

        // Step 1: Validate user and re-price the cart from the catalog
        let user = self.load_user(&request.user_id).await?;
        let (items, discount, analysis) = self.price_request(&request).await?;

        if let Some(expected) = request.expected_total {
            if expected != analysis.total {
                warn!(%expected, actual = %analysis.total, "Checkout total moved since preview");
                return Err(OrderError::PriceChanged {
                    expected,
                    actual: analysis.total,
                });
            }
        }

        // Step 2: Reserve stock line by line
        let mut reserved: Vec<(String, u32)> = Vec::with_capacity(items.len());
        for item in &items {
            match self.product_client.reserve_stock(item.product_id.clone(), item.quantity).await {
                Ok(left) => {
                    debug!(product_id = %item.product_id, left, "Stock reserved");
                    reserved.push((item.product_id.clone(), item.quantity));
                }
                Err(e) => {
                    error!(product_id = %item.product_id, error = %e, "Stock reservation failed");
                    self.roll_back(&reserved, None).await;
                    return Err(product_to_order_error(&item.product_id, e));
                }
            }
        }

        // Step 3: Consume the discount
        let redeemed_code = match &discount {
            Some(discount) => match self.discount_client.redeem_code(&discount.code, analysis.subtotal).await {
                Ok(_) => Some(discount.code.clone()),
                Err(e) => {
                    error!(code = %discount.code, error = %e, "Discount redemption failed");
                    self.roll_back(&reserved, None).await;
                    return Err(e.into());
                }
            },
            None => None,
        };

        // Step 4: Persist
        let shipping_method = request
            .shipping_option_id
            .as_deref()
            .and_then(|id| self.settings.shipping_options.iter().find(|option| option.id == id))
            .map(|option| option.name.clone());
        let params = OrderCreate {
            order_number: self.order_numbers.next(Utc::now()),
            user_id: user.id.clone(),
            items,
            subtotal: analysis.subtotal,
            discount_amount: analysis.discount_amount,
            discount_code: redeemed_code.clone(),
            shipping_method,
            shipping_fee: analysis.shipping_fee,
            total_amount: analysis.total,
            payment_type: analysis.payment_type,
            deposit_amount: analysis.deposit_amount,
            remaining_amount: analysis.remaining_amount,
            contact: request.contact,
        };
        let order = match self.persist(params).await {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "Order persistence failed");
                self.roll_back(&reserved, redeemed_code.as_deref()).await;
                return Err(e);
            }
        };

        info!(order_id = %order.id, order_number = %order.order_number, total = %order.total_amount, "Order placed");

        // Step 5: Fire-and-forget receipt
        self.dispatcher.dispatch_receipt(&order, user.line_user_id.as_deref());

        Ok(order)
    }

    async fn persist(&self, params: OrderCreate) -> Result<Order, OrderError> {
        let id = self.inner.create(params).await?;
        self.inner
            .get(id.clone())
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.get(id).await?)
    }

    /// Back-office order list, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list().await?;
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.order_number.cmp(&a.order_number))
        });
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(orders.into_iter().filter(|order| order.user_id == user_id).collect())
    }

    /// Admin status change. Choosing `Cancelled` runs the full cancellation.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        if status == OrderStatus::Cancelled {
            return self.cancel_order(id).await;
        }
        debug!("Sending request");
        let order = self.inner.perform_action(id, OrderAction::UpdateStatus(status)).await?;
        info!(order_number = %order.order_number, status = status.label(), "Order status updated");
        Ok(order)
    }

    #[instrument(skip(self, payment), fields(amount = %payment.amount))]
    pub async fn submit_payment(&self, id: String, payment: PaymentNotification) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.perform_action(id, OrderAction::SubmitPayment(payment)).await?;
        let text = format!(
            "Transfer slip received for order {} ({} notified of {} total)",
            order.order_number,
            order.amount_notified(),
            order.total_amount
        );
        self.dispatcher.notify_admin(&order.order_number, text);
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.perform_action(id, OrderAction::ConfirmPayment).await?;
        info!(order_number = %order.order_number, status = order.status.label(), "Payment confirmed");
        Ok(order)
    }

    /// Cancels the order and puts its units back on the shelf.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.perform_action(id, OrderAction::Cancel).await?;
        let reserved: Vec<(String, u32)> = order
            .items
            .iter()
            .map(|item| (item.product_id.clone(), item.quantity))
            .collect();
        self.roll_back(&reserved, None).await;
        info!(order_number = %order.order_number, "Order cancelled");
        Ok(order)
    }
}
