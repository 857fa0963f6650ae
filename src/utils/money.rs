//! 金额计算
//!
//! 内部统一使用 `Decimal` 计算，落库与序列化时转换为保留两位小数的 `f64`。

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// 转回 `f64`，四舍五入到两位小数（远离零）
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `amount × percentage / 100`
pub fn percentage_of(amount: Decimal, percentage: f64) -> Decimal {
    amount * to_decimal(percentage) / Decimal::ONE_HUNDRED
}

/// 单价 × 数量
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// 多个 `f64` 金额求和
pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> Decimal {
    values.into_iter().map(to_decimal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
        assert_eq!(to_f64(Decimal::new(-1005, 3)), -1.01);
        assert_eq!(to_f64(Decimal::new(1004, 3)), 1.0);
    }

    #[test]
    fn test_float_noise_is_removed() {
        // 0.1 + 0.2 在 f64 下为 0.30000000000000004
        assert_eq!(to_f64(sum([0.1, 0.2])), 0.3);
    }

    #[test]
    fn test_percentage_and_line_total() {
        assert_eq!(to_f64(percentage_of(to_decimal(1000.0), 40.0)), 400.0);
        assert_eq!(to_f64(percentage_of(to_decimal(400.0), 12.5)), 50.0);
        assert_eq!(to_f64(line_total(3.35, 3)), 10.05);
    }
}
