use crate::domain::{OrderStatus, PaymentNotification};

/// Lifecycle changes applied to a stored order. Every action answers with the
/// updated order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Admin status change from the back-office.
    UpdateStatus(OrderStatus),
    /// Customer uploaded a transfer slip.
    SubmitPayment(PaymentNotification),
    /// Admin checked the slips against the bank statement.
    ConfirmPayment,
    Cancel,
}
