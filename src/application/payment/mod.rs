mod errors;
mod payment_service;

pub use errors::{PaymentError, Result};
pub use payment_service::{
    PaymentConfirmation, RefundConfirmation, pay_late_fees, refund_late_fee_payment,
};
