//! Best-effort chat notifications.
//!
//! Pushes run on their own tasks and only ever log failures: a customer whose
//! receipt did not arrive still has a placed order.

mod line;

pub use line::LineMessagingClient;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

use crate::domain::{Order, PaymentType};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("invalid channel access token")]
    InvalidToken,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn push_text(&self, to: &str, text: &str) -> Result<(), NotifyError>;
}

/// Stand-in used when no channel token is configured.
#[derive(Debug, Default, Clone)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn push_text(&self, to: &str, _text: &str) -> Result<(), NotifyError> {
        debug!(to, "Chat notifications disabled, skipping push");
        Ok(())
    }
}

/// Plain-text receipt pushed to the customer and the shop's admin chat.
pub fn render_receipt(order: &Order, shop_name: &str) -> String {
    let mut lines = vec![
        format!("{} - order {}", shop_name, order.order_number),
        format!("Customer: {} ({})", order.contact.name, order.contact.phone),
    ];
    lines.extend(order.items.iter().map(|item| {
        format!(
            "- {} x{} @ {} = {}",
            item.product_name,
            item.quantity,
            item.unit_price,
            item.line_total()
        )
    }));
    lines.push(format!("Subtotal: {}", order.subtotal));
    if let Some(code) = &order.discount_code {
        lines.push(format!("Discount ({}): -{}", code, order.discount_amount));
    }
    if let Some(method) = &order.shipping_method {
        lines.push(format!("Shipping ({}): {}", method, order.shipping_fee));
    }
    lines.push(format!("Total: {}", order.total_amount));
    lines.push(match order.payment_type {
        PaymentType::Full => format!("Please transfer {} to confirm your order.", order.total_amount),
        PaymentType::Deposit => format!(
            "Deposit due now: {}. Remaining {} on pickup.",
            order.deposit_amount, order.remaining_amount
        ),
    });
    lines.join("\n")
}

/// Fans messages out to the customer's and the admin's chats.
#[derive(Clone)]
pub struct ReceiptDispatcher {
    notifier: Arc<dyn Notifier>,
    admin_target: Option<String>,
    shop_name: String,
}

impl ReceiptDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, admin_target: Option<String>, shop_name: impl Into<String>) -> Self {
        Self {
            notifier,
            admin_target,
            shop_name: shop_name.into(),
        }
    }

    /// Sends the order receipt without waiting for delivery. The returned
    /// handles are only awaited by tests.
    pub fn dispatch_receipt(&self, order: &Order, customer_target: Option<&str>) -> Vec<JoinHandle<()>> {
        let text = render_receipt(order, &self.shop_name);
        let targets = customer_target.into_iter().map(str::to_string).chain(self.admin_target.clone());
        targets
            .map(|to| self.spawn_push(to, text.clone(), &order.order_number))
            .collect()
    }

    /// Pings the admin chat only, e.g. when a transfer slip arrives.
    pub fn notify_admin(&self, order_number: &str, text: String) -> Option<JoinHandle<()>> {
        let to = self.admin_target.clone()?;
        Some(self.spawn_push(to, text, order_number))
    }

    fn spawn_push(&self, to: String, text: String, order_number: &str) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let span = tracing::info_span!("chat_push", order_number = %order_number, to = %to);
        tokio::spawn(
            async move {
                match notifier.push_text(&to, &text).await {
                    Ok(()) => info!("Notification delivered"),
                    Err(e) => warn!(error = %e, "Notification failed, order unaffected"),
                }
            }
            .instrument(span),
        )
    }
}
