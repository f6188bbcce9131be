use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::OrderAction;
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, PaymentNotification, PaymentType};

impl Order {
    fn transition(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition { from: self.status, to: next });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn submit_payment(&mut self, payment: PaymentNotification) -> Result<(), OrderError> {
        if payment.amount <= Decimal::ZERO {
            return Err(OrderError::PaymentRejected(format!("amount must be positive, got {}", payment.amount)));
        }
        if payment.slip_image_url.trim().is_empty() {
            return Err(OrderError::PaymentRejected("transfer slip is missing".to_string()));
        }
        self.transition(OrderStatus::PaymentSubmitted)?;
        self.payments.push(payment);
        Ok(())
    }

    /// Paid in full once the slips cover the total; a deposit order that only
    /// covered part of it stops at `DepositPaid`.
    fn confirm_payment(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::PaymentSubmitted {
            return Err(OrderError::PaymentRejected(format!(
                "no submitted payment to confirm (status is {})",
                self.status.label()
            )));
        }
        let notified = self.amount_notified();
        if notified < self.amount_due_now() {
            return Err(OrderError::PaymentRejected(format!(
                "notified {} but {} is due",
                notified,
                self.amount_due_now()
            )));
        }
        let next = match self.payment_type {
            PaymentType::Deposit if notified < self.total_amount => OrderStatus::DepositPaid,
            _ => OrderStatus::Paid,
        };
        self.transition(next)
    }
}

impl Entity for Order {
    const KIND: &'static str = "order";
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        if params.deposit_amount + params.remaining_amount != params.total_amount {
            return Err(OrderError::ValidationError(format!(
                "deposit {} and remaining {} do not add up to total {}",
                params.deposit_amount, params.remaining_amount, params.total_amount
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            order_number: params.order_number,
            user_id: params.user_id,
            status: OrderStatus::PendingPayment,
            items: params.items,
            subtotal: params.subtotal,
            discount_amount: params.discount_amount,
            discount_code: params.discount_code,
            shipping_method: params.shipping_method,
            shipping_fee: params.shipping_fee,
            total_amount: params.total_amount,
            payment_type: params.payment_type,
            deposit_amount: params.deposit_amount,
            remaining_amount: params.remaining_amount,
            contact: params.contact,
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Orders are never edited field by field; all changes go through actions.
    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Ok(())
    }

    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::ValidationError("orders are cancelled, not deleted".to_string()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Order, OrderError> {
        match action {
            // Cancelling releases stock, so it has its own action.
            OrderAction::UpdateStatus(OrderStatus::Cancelled) => {
                return Err(OrderError::ValidationError(
                    "use the cancel action to cancel an order".to_string(),
                ));
            }
            OrderAction::UpdateStatus(next) => self.transition(next)?,
            OrderAction::SubmitPayment(payment) => self.submit_payment(payment)?,
            OrderAction::ConfirmPayment => self.confirm_payment()?,
            OrderAction::Cancel => self.transition(OrderStatus::Cancelled)?,
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerContact, OrderItem, ProductCategory};
    use rust_decimal_macros::dec;

    fn deposit_order() -> Order {
        let params = OrderCreate {
            order_number: "PS20260101000000000".into(),
            user_id: "user_1".into(),
            items: vec![OrderItem {
                product_id: "product_1".into(),
                product_name: "Persian kitten".into(),
                category: ProductCategory::Cat,
                quantity: 1,
                unit_price: dec!(12000),
            }],
            subtotal: dec!(12000),
            discount_amount: Decimal::ZERO,
            discount_code: None,
            shipping_method: None,
            shipping_fee: Decimal::ZERO,
            total_amount: dec!(12000),
            payment_type: PaymentType::Deposit,
            deposit_amount: dec!(1200),
            remaining_amount: dec!(10800),
            contact: CustomerContact::new("Nok", "0812345678", "Bangkok"),
        };
        Order::from_create_params("order_1".into(), params).unwrap()
    }

    fn slip(amount: Decimal) -> PaymentNotification {
        PaymentNotification {
            amount,
            paid_at: Utc::now(),
            slip_image_url: "https://cdn.example.com/slips/1.jpg".into(),
            note: None,
        }
    }

    #[test]
    fn test_deposit_then_remaining() {
        let mut order = deposit_order();
        order.handle_action(OrderAction::SubmitPayment(slip(dec!(1200)))).unwrap();
        let order_after = order.handle_action(OrderAction::ConfirmPayment).unwrap();
        assert_eq!(order_after.status, OrderStatus::DepositPaid);

        order.handle_action(OrderAction::SubmitPayment(slip(dec!(10800)))).unwrap();
        let order_after = order.handle_action(OrderAction::ConfirmPayment).unwrap();
        assert_eq!(order_after.status, OrderStatus::Paid);
        assert_eq!(order_after.payments.len(), 2);
    }

    #[test]
    fn test_underpaid_slip_cannot_be_confirmed() {
        let mut order = deposit_order();
        order.handle_action(OrderAction::SubmitPayment(slip(dec!(500)))).unwrap();
        assert!(matches!(
            order.handle_action(OrderAction::ConfirmPayment),
            Err(OrderError::PaymentRejected(_))
        ));
        assert_eq!(order.status, OrderStatus::PaymentSubmitted);
    }

    #[test]
    fn test_cancelled_orders_are_frozen() {
        let mut order = deposit_order();
        order.handle_action(OrderAction::Cancel).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::UpdateStatus(OrderStatus::Paid)),
            Err(OrderError::InvalidTransition { from: OrderStatus::Cancelled, to: OrderStatus::Paid })
        );
        assert!(order.handle_action(OrderAction::SubmitPayment(slip(dec!(1200)))).is_err());
    }

    #[test]
    fn test_status_update_cannot_cancel() {
        let mut order = deposit_order();
        assert!(matches!(
            order.handle_action(OrderAction::UpdateStatus(OrderStatus::Cancelled)),
            Err(OrderError::ValidationError(_))
        ));
        assert_eq!(order.status, OrderStatus::PendingPayment);
    }

    #[test]
    fn test_shipped_orders_cannot_be_cancelled() {
        let mut order = deposit_order();
        order.handle_action(OrderAction::UpdateStatus(OrderStatus::Paid)).unwrap();
        order.handle_action(OrderAction::UpdateStatus(OrderStatus::Shipped)).unwrap();
        assert_eq!(
            order.handle_action(OrderAction::Cancel),
            Err(OrderError::InvalidTransition { from: OrderStatus::Shipped, to: OrderStatus::Cancelled })
        );
    }

    #[test]
    fn test_rejects_inconsistent_split() {
        let mut order = deposit_order();
        order.remaining_amount = dec!(1);
        let params = OrderCreate {
            order_number: order.order_number,
            user_id: order.user_id,
            items: order.items,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            discount_code: None,
            shipping_method: None,
            shipping_fee: order.shipping_fee,
            total_amount: order.total_amount,
            payment_type: order.payment_type,
            deposit_amount: order.deposit_amount,
            remaining_amount: order.remaining_amount,
            contact: order.contact,
        };
        assert!(matches!(
            Order::from_create_params("order_2".into(), params),
            Err(OrderError::ValidationError(_))
        ));
    }
}
