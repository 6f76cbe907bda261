//! 段階制の延滞料金

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

/// 書籍1冊あたりの延滞料金の上限
pub const MAX_LATE_FEE: Decimal = dec!(15.00);

/// 第1段階の料率が適用される日数
pub const FIRST_TIER_DAYS: i64 = 7;

const FIRST_TIER_DAILY_RATE: Decimal = dec!(0.50);
const SECOND_TIER_DAILY_RATE: Decimal = dec!(1.00);

/// この日数を超えると常に上限が適用される
const CAP_REACHED_AFTER_DAYS: i64 = 19;

fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `days_overdue` 日延滞した場合の料金
///
/// 最初の7日間は1日0.50、それ以降は1日1.00。上限は [`MAX_LATE_FEE`]。
/// 0以下の日数は料金なし。
pub fn compute_fee(days_overdue: i64) -> Decimal {
    if days_overdue <= 0 {
        return dec!(0.00);
    }
    // 大きな入力でも桁あふれしないよう日数を切り詰める（上限が優先される）
    let days = days_overdue.min(CAP_REACHED_AFTER_DAYS);

    let first = FIRST_TIER_DAILY_RATE * Decimal::from(days.min(FIRST_TIER_DAYS));
    let rest = SECOND_TIER_DAILY_RATE * Decimal::from((days - FIRST_TIER_DAYS).max(0));

    round_currency((first + rest).min(MAX_LATE_FEE))
}

/// 返却期限から `as_of` までの暦日数（0未満にはならない）
///
/// 時刻は無視する。
pub fn days_overdue(due_date: DateTime<Utc>, as_of: DateTime<Utc>) -> i64 {
    (as_of.date_naive() - due_date.date_naive())
        .num_days()
        .max(0)
}

/// 貸出1件の延滞料金（保存せず都度計算する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeResult {
    pub fee_amount: Decimal,
    pub days_overdue: i64,
}

impl FeeResult {
    /// 料金なし
    pub fn none() -> Self {
        Self {
            fee_amount: dec!(0.00),
            days_overdue: 0,
        }
    }

    pub fn for_due_date(due_date: DateTime<Utc>, as_of: DateTime<Utc>) -> Self {
        let days = days_overdue(due_date, as_of);
        Self {
            fee_amount: compute_fee(days),
            days_overdue: days,
        }
    }

    pub fn is_owed(&self) -> bool {
        self.fee_amount > Decimal::ZERO
    }
}

impl Default for FeeResult {
    fn default() -> Self {
        Self::none()
    }
}

/// 料金の合計（セント単位に丸める）
pub fn total_fees<I>(fees: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round_currency(fees.into_iter().fold(dec!(0.00), |acc, fee| acc + fee))
}
