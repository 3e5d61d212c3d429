//! Order total and discount calculation
//!
//! Arithmetic is done in `Decimal`; only the summed discount is rounded
//! (half away from zero, whole Rupiah) so `total = subtotal - discount`
//! stays an integer.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Minimal view of a priced line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: i64,
    pub quantity: i32,
    pub discount_percent: Option<i32>,
}

/// Totals shown to the customer and stored on the order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Σ price × quantity
    pub subtotal: i64,
    /// Σ price × quantity × percent / 100, rounded once
    pub discount: i64,
    /// subtotal − discount
    pub total: i64,
}

impl OrderSummary {
    /// Fails with `ValueOutOfRange` when a sum does not fit in whole Rupiah `i64`
    pub fn compute(lines: &[PricedLine]) -> Result<Self, AppError> {
        let too_large = || AppError::out_of_range("total");
        let mut subtotal = Decimal::ZERO;
        let mut discount = Decimal::ZERO;

        for line in lines {
            let gross = Decimal::from(line.unit_price)
                .checked_mul(Decimal::from(line.quantity))
                .ok_or_else(too_large)?;
            subtotal = subtotal.checked_add(gross).ok_or_else(too_large)?;
            if let Some(pct) = line.discount_percent {
                let cut = gross
                    .checked_mul(Decimal::from(pct.clamp(0, 100)))
                    .and_then(|d| d.checked_div(HUNDRED))
                    .ok_or_else(too_large)?;
                discount = discount.checked_add(cut).ok_or_else(too_large)?;
            }
        }

        let discount = discount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let subtotal = subtotal.to_i64().ok_or_else(too_large)?;
        let discount = discount.to_i64().ok_or_else(too_large)?;

        Ok(Self {
            subtotal,
            discount,
            total: subtotal - discount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn line(unit_price: i64, quantity: i32, discount_percent: Option<i32>) -> PricedLine {
        PricedLine {
            unit_price,
            quantity,
            discount_percent,
        }
    }

    #[test]
    fn test_empty_order() {
        assert_eq!(OrderSummary::compute(&[]).unwrap(), OrderSummary::default());
    }

    #[test]
    fn test_no_discount() {
        let s = OrderSummary::compute(&[line(18_000, 2, None), line(12_000, 1, Some(0))]).unwrap();
        assert_eq!(s.subtotal, 48_000);
        assert_eq!(s.discount, 0);
        assert_eq!(s.total, 48_000);
    }

    #[test]
    fn test_mixed_discounts() {
        // 2 × 25,000 at 10% and 1 × 15,000 at 50%
        let lines = [line(25_000, 2, Some(10)), line(15_000, 1, Some(50))];
        let s = OrderSummary::compute(&lines).unwrap();
        assert_eq!(s.subtotal, 65_000);
        assert_eq!(s.discount, 5_000 + 7_500);
        assert_eq!(s.total, 52_500);
    }

    #[test]
    fn test_discount_rounds_half_up_once() {
        // 3 × 1,005 at 10% = 301.5, rounded to 302
        let s = OrderSummary::compute(&[line(1_005, 3, Some(10))]).unwrap();
        assert_eq!(s.discount, 302);
        assert_eq!(s.total, 3_015 - 302);

        // two lines of 0.5 each sum to exactly 1 before rounding
        let s = OrderSummary::compute(&[line(5, 1, Some(10)), line(5, 1, Some(10))]).unwrap();
        assert_eq!(s.discount, 1);
    }

    #[test]
    fn test_full_discount() {
        let s = OrderSummary::compute(&[line(20_000, 1, Some(100))]).unwrap();
        assert_eq!(s.total, 0);
    }

    #[test]
    fn test_totals_beyond_i64_rejected() {
        // 10^13 × 10^6 = 10^19, past i64::MAX
        let err = OrderSummary::compute(&[line(10_000_000_000_000, 1_000_000, Some(10))])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        // past Decimal's own range
        let err = OrderSummary::compute(&[line(i64::MAX, i32::MAX, None); 5]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_largest_valid_order_fits() {
        // 100 lines at the validated maximums
        let s = OrderSummary::compute(&[line(1_000_000_000, 1000, Some(50)); 100]).unwrap();
        assert_eq!(s.subtotal, 100_000_000_000_000);
        assert_eq!(s.total, 50_000_000_000_000);
    }
}
