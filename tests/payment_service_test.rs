use chrono::{Duration, Utc};
use library_fees::application::payment::{PaymentError, pay_late_fees, refund_late_fee_payment};
use library_fees::domain::BookId;
use library_fees::domain::commands::{PayLateFees, RefundLateFee};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

use common::GatewayReply;

fn pay(patron_id: &str, book_id: i64) -> PayLateFees {
    PayLateFees {
        patron_id: patron_id.to_string(),
        book_id: BookId::new(book_id),
        as_of: Utc::now(),
    }
}

fn refund(transaction_id: &str, amount: Decimal) -> RefundLateFee {
    RefundLateFee {
        transaction_id: transaction_id.to_string(),
        amount,
    }
}

/// 10日延滞（6.50）の貸出を1件持つスタブ
fn overdue_setup() -> (
    std::sync::Arc<common::StubLibrary>,
    std::sync::Arc<common::StubGateway>,
    library_fees::application::ServiceDependencies,
) {
    let (library, gateway, deps) = common::setup();
    let now = Utc::now();
    library.add_book(1, "Overdue Novel", "Author", "1234567890123", 1, 0);
    library.add_loan_due("123456", 1, "Overdue Novel", now - Duration::days(10));
    (library, gateway, deps)
}

// ============================================================================
// 延滞料金の支払い
// ============================================================================

#[tokio::test]
async fn test_pay_late_fees_success() {
    let (_, gateway, deps) = overdue_setup();

    let confirmation = pay_late_fees(&deps, pay("123456", 1)).await.unwrap();

    assert_eq!(confirmation.transaction_id, "txn_123");
    assert_eq!(confirmation.amount, dec!(6.50));
    assert_eq!(confirmation.to_string(), "Payment successful! Success");

    let calls = gateway.payment_calls();
    assert_eq!(calls.len(), 1);
    let (patron_id, amount, description) = &calls[0];
    assert_eq!(patron_id, "123456");
    assert_eq!(*amount, dec!(6.50));
    assert_eq!(description, "Late fees for 'Overdue Novel'");
}

#[tokio::test]
async fn test_pay_late_fees_invalid_patron_does_not_call_gateway() {
    let (_, gateway, deps) = overdue_setup();

    let err = pay_late_fees(&deps, pay("12345", 1)).await.unwrap_err();

    assert!(matches!(err, PaymentError::InvalidPatronId));
    assert_eq!(
        err.to_string(),
        "Invalid patron ID. Must be exactly 6 digits."
    );
    assert!(gateway.payment_calls().is_empty());
}

#[tokio::test]
async fn test_pay_late_fees_without_fee_does_not_call_gateway() {
    let (library, gateway, deps) = common::setup();
    let now = Utc::now();
    library.add_book(1, "On Time", "Author", "1234567890123", 1, 0);
    library.add_current_loan("123456", 1, "On Time", now, now + Duration::days(14));

    let err = pay_late_fees(&deps, pay("123456", 1)).await.unwrap_err();

    assert!(matches!(err, PaymentError::NoFeesDue));
    assert_eq!(err.to_string(), "No late fees to pay for this book.");
    assert!(gateway.payment_calls().is_empty());

    // 貸出記録がない場合も同じ
    let err = pay_late_fees(&deps, pay("654321", 1)).await.unwrap_err();
    assert!(matches!(err, PaymentError::NoFeesDue));
    assert!(gateway.payment_calls().is_empty());
}

#[tokio::test]
async fn test_pay_late_fees_book_missing() {
    let (library, gateway, deps) = common::setup();
    let now = Utc::now();
    library.add_loan_due("123456", 7, "Ghost", now - Duration::days(16));

    let err = pay_late_fees(&deps, pay("123456", 7)).await.unwrap_err();

    assert!(matches!(err, PaymentError::BookNotFound));
    assert_eq!(err.to_string(), "Book not found.");
    assert!(gateway.payment_calls().is_empty());
}

#[tokio::test]
async fn test_pay_late_fees_declined() {
    let (_, gateway, deps) = overdue_setup();
    gateway.reply_to_payments(GatewayReply::Decline("Insufficient funds".to_string()));

    let err = pay_late_fees(&deps, pay("123456", 1)).await.unwrap_err();

    assert!(matches!(err, PaymentError::PaymentDeclined(_)));
    assert_eq!(err.to_string(), "Payment failed: Insufficient funds");
    assert_eq!(gateway.payment_calls().len(), 1);
}

#[tokio::test]
async fn test_pay_late_fees_gateway_error() {
    let (_, gateway, deps) = overdue_setup();
    gateway.reply_to_payments(GatewayReply::Error("Network timeout".to_string()));

    let err = pay_late_fees(&deps, pay("123456", 1)).await.unwrap_err();

    assert!(matches!(err, PaymentError::PaymentGatewayFailed(_)));
    assert_eq!(err.to_string(), "Payment processing error: Network timeout");
}

// ============================================================================
// 返金
// ============================================================================

#[tokio::test]
async fn test_refund_success_relays_gateway_message() {
    let (_, gateway, deps) = common::setup();

    let confirmation = refund_late_fee_payment(&deps, refund("txn_123456", dec!(10.00)))
        .await
        .unwrap();

    assert_eq!(confirmation.to_string(), "Refund OK");
    assert_eq!(
        gateway.refund_calls(),
        vec![("txn_123456".to_string(), dec!(10.00))]
    );
}

#[tokio::test]
async fn test_refund_at_maximum_is_allowed() {
    let (_, gateway, deps) = common::setup();

    let result = refund_late_fee_payment(&deps, refund("txn_1", dec!(15.00))).await;

    assert!(result.is_ok());
    assert_eq!(gateway.refund_calls().len(), 1);
}

#[tokio::test]
async fn test_refund_rejects_invalid_input_without_calling_gateway() {
    let cases = [
        (refund("invalid_tx", dec!(10.00)), "Invalid transaction ID."),
        (refund("", dec!(10.00)), "Invalid transaction ID."),
        (refund("txn_1", dec!(0)), "Refund amount must be greater than 0."),
        (refund("txn_1", dec!(-5.00)), "Refund amount must be greater than 0."),
        (refund("txn_1", dec!(15.01)), "Refund amount exceeds maximum late fee."),
        (refund("txn_1", dec!(20.00)), "Refund amount exceeds maximum late fee."),
    ];

    for (cmd, expected) in cases {
        let (_, gateway, deps) = common::setup();
        let err = refund_late_fee_payment(&deps, cmd).await.unwrap_err();
        assert_eq!(err.to_string(), expected);
        assert!(gateway.refund_calls().is_empty());
    }
}

#[tokio::test]
async fn test_refund_declined_and_gateway_error() {
    let (_, gateway, deps) = common::setup();

    gateway.reply_to_refunds(GatewayReply::Decline("Transaction not found".to_string()));
    let err = refund_late_fee_payment(&deps, refund("txn_1", dec!(5.00)))
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::RefundDeclined(_)));
    assert_eq!(err.to_string(), "Refund failed: Transaction not found");

    gateway.reply_to_refunds(GatewayReply::Error("Gateway unavailable".to_string()));
    let err = refund_late_fee_payment(&deps, refund("txn_1", dec!(5.00)))
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::RefundGatewayFailed(_)));
    assert_eq!(
        err.to_string(),
        "Refund processing error: Gateway unavailable"
    );
}
