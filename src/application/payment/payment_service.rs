use crate::application::ServiceDependencies;
use crate::application::circulation::calculate_late_fee_for_book;
use crate::domain::{
    MAX_LATE_FEE, PatronId,
    commands::{PayLateFees, RefundLateFee},
    validation::is_valid_transaction_id,
};
use rust_decimal::Decimal;

use super::errors::{PaymentError, Result};

/// 支払い完了
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub transaction_id: String,
    pub amount: Decimal,
    pub gateway_message: String,
}

impl std::fmt::Display for PaymentConfirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payment successful! {}", self.gateway_message)
    }
}

/// 返金完了（ゲートウェイのメッセージをそのまま表示する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundConfirmation {
    pub gateway_message: String,
}

impl std::fmt::Display for RefundConfirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.gateway_message)
    }
}

/// 延滞料金を支払う
///
/// ビジネスルール：
/// - 会員IDが6桁の数字であること
/// - `as_of` 時点の延滞料金が0より大きいこと
/// - 書籍が存在すること
///
/// いずれかに違反した場合、ゲートウェイは呼び出さない。
pub async fn pay_late_fees(
    deps: &ServiceDependencies,
    cmd: PayLateFees,
) -> Result<PaymentConfirmation> {
    // 1. 会員IDの形式確認
    let patron_id = PatronId::parse(&cmd.patron_id).ok_or(PaymentError::InvalidPatronId)?;

    // 2. 延滞料金の計算
    let fee = calculate_late_fee_for_book(deps, &patron_id, cmd.book_id, cmd.as_of).await;
    if !fee.is_owed() {
        return Err(PaymentError::NoFeesDue);
    }

    // 3. 書籍の存在確認
    let book = deps
        .books
        .get_book_by_id(cmd.book_id)
        .await
        .map_err(PaymentError::BookLookupFailed)?
        .ok_or(PaymentError::BookNotFound)?;

    // 4. ゲートウェイで決済
    let description = format!("Late fees for '{}'", book.title);
    let outcome = deps
        .payment_gateway
        .process_payment(&patron_id, fee.fee_amount, &description)
        .await
        .map_err(|e| {
            tracing::error!(patron_id = %patron_id, error = %e, "payment gateway error");
            PaymentError::PaymentGatewayFailed(e)
        })?;

    // 5. 結果の中継
    if !outcome.success {
        tracing::debug!(patron_id = %patron_id, reason = %outcome.message, "payment declined");
        return Err(PaymentError::PaymentDeclined(outcome.message));
    }

    tracing::info!(
        patron_id = %patron_id,
        book_id = %book.id,
        amount = %fee.fee_amount,
        transaction_id = %outcome.transaction_id,
        "late fee paid"
    );

    Ok(PaymentConfirmation {
        transaction_id: outcome.transaction_id,
        amount: fee.fee_amount,
        gateway_message: outcome.message,
    })
}

/// 延滞料金の支払いを返金する
///
/// ビジネスルール：
/// - 取引IDが `txn_` で始まること
/// - 返金額が 0 < amount <= 15.00（1冊あたりの延滞料金上限）であること
///
/// いずれかに違反した場合、ゲートウェイは呼び出さない。
pub async fn refund_late_fee_payment(
    deps: &ServiceDependencies,
    cmd: RefundLateFee,
) -> Result<RefundConfirmation> {
    // 1. 入力検証
    if !is_valid_transaction_id(&cmd.transaction_id) {
        return Err(PaymentError::InvalidTransactionId);
    }
    if cmd.amount <= Decimal::ZERO {
        return Err(PaymentError::RefundAmountNotPositive);
    }
    if cmd.amount > MAX_LATE_FEE {
        return Err(PaymentError::RefundAmountExceedsMaximum);
    }

    // 2. ゲートウェイで返金
    let outcome = deps
        .payment_gateway
        .refund_payment(&cmd.transaction_id, cmd.amount)
        .await
        .map_err(|e| {
            tracing::error!(
                transaction_id = %cmd.transaction_id,
                error = %e,
                "refund gateway error"
            );
            PaymentError::RefundGatewayFailed(e)
        })?;

    if !outcome.success {
        tracing::debug!(
            transaction_id = %cmd.transaction_id,
            reason = %outcome.message,
            "refund declined"
        );
        return Err(PaymentError::RefundDeclined(outcome.message));
    }

    tracing::info!(transaction_id = %cmd.transaction_id, amount = %cmd.amount, "late fee refunded");

    Ok(RefundConfirmation {
        gateway_message: outcome.message,
    })
}
