use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    PaymentSubmitted,
    DepositPaid,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Moves an admin may make from the back-office status menu.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        if self.is_terminal() || self == next {
            return false;
        }
        match next {
            // Shipped goods have left the shop and cannot go back on the shelf.
            Cancelled => self != Shipped,
            PendingPayment => self == PaymentSubmitted,
            PaymentSubmitted => matches!(self, PendingPayment | DepositPaid),
            DepositPaid => matches!(self, PendingPayment | PaymentSubmitted),
            Paid => matches!(self, PendingPayment | PaymentSubmitted | DepositPaid),
            Shipped => self == Paid,
            // Deposit orders settle the remainder on pickup.
            Completed => matches!(self, Paid | Shipped | DepositPaid),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PendingPayment => "pending payment",
            Self::PaymentSubmitted => "payment submitted",
            Self::DepositPaid => "deposit paid",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Full,
    Deposit,
}

/// Line item with the price captured at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub category: ProductCategory,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
}

impl CustomerContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            note: None,
        }
    }
}

/// Bank-transfer evidence uploaded by the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub amount: Decimal,
    pub paid_at: DateTime<Utc>,
    pub slip_image_url: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub discount_code: Option<String>,
    pub shipping_method: Option<String>,
    pub shipping_fee: Decimal,
    pub total_amount: Decimal,
    pub payment_type: PaymentType,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    pub contact: CustomerContact,
    pub payments: Vec<PaymentNotification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn amount_notified(&self) -> Decimal {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// What the customer still owes before the order counts as paid up front.
    pub fn amount_due_now(&self) -> Decimal {
        match self.payment_type {
            PaymentType::Full => self.total_amount,
            PaymentType::Deposit => self.deposit_amount,
        }
    }
}

/// Fully priced order, computed by the checkout flow before persisting.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_number: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub discount_code: Option<String>,
    pub shipping_method: Option<String>,
    pub shipping_fee: Decimal,
    pub total_amount: Decimal,
    pub payment_type: PaymentType,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
    pub contact: CustomerContact,
}
