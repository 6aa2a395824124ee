//! 批量規則實現

use mrp_core::{LotSizingPolicy, LotSizingRule};
use rust_decimal::Decimal;

/// 批量規則計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 應用批量規則
    ///
    /// 依固定優先序只套用一條：再訂購點 > 最小訂購量 > 最小包裝量倍數 > 批對批。
    /// 調整需求不為正時不需下單。
    pub fn apply(policy: &LotSizingPolicy, adjusted_demand: Decimal) -> (Decimal, LotSizingRule) {
        if adjusted_demand <= Decimal::ZERO {
            return (Decimal::ZERO, LotSizingRule::None);
        }

        if policy.reorder_point > Decimal::ZERO {
            (policy.reorder_point + adjusted_demand, LotSizingRule::ReorderPoint)
        } else if policy.moq > adjusted_demand {
            (policy.moq, LotSizingRule::MinimumOrder)
        } else if policy.mpq > Decimal::ZERO {
            (
                Self::round_up_to_multiple(adjusted_demand, policy.mpq),
                LotSizingRule::PackMultiple,
            )
        } else {
            (adjusted_demand, LotSizingRule::LotForLot)
        }
    }

    /// 進位至 `multiple` 的倍數
    pub fn round_up_to_multiple(quantity: Decimal, multiple: Decimal) -> Decimal {
        if multiple <= Decimal::ZERO {
            return quantity;
        }
        (quantity / multiple).ceil() * multiple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn policy(reorder_point: i64, moq: i64, mpq: i64) -> LotSizingPolicy {
        LotSizingPolicy::new(
            Decimal::from(mpq),
            Decimal::from(moq),
            Decimal::from(reorder_point),
        )
    }

    #[rstest]
    #[case::reorder_point_wins(50, 100, 10, 20, 70, LotSizingRule::ReorderPoint)]
    #[case::moq_fallback(0, 100, 0, 40, 100, LotSizingRule::MinimumOrder)]
    #[case::mpq_rounding(0, 0, 25, 51, 75, LotSizingRule::PackMultiple)]
    #[case::mpq_exact_multiple(0, 0, 25, 50, 50, LotSizingRule::PackMultiple)]
    #[case::moq_equal_goes_to_mpq(0, 40, 25, 40, 50, LotSizingRule::PackMultiple)]
    #[case::lot_for_lot(0, 0, 0, 33, 33, LotSizingRule::LotForLot)]
    #[case::nothing_to_order(50, 100, 10, 0, 0, LotSizingRule::None)]
    fn test_apply(
        #[case] reorder_point: i64,
        #[case] moq: i64,
        #[case] mpq: i64,
        #[case] adjusted: i64,
        #[case] expected: i64,
        #[case] rule: LotSizingRule,
    ) {
        let (qty, applied) = LotSizingCalculator::apply(
            &policy(reorder_point, moq, mpq),
            Decimal::from(adjusted),
        );
        assert_eq!(qty, Decimal::from(expected));
        assert_eq!(applied, rule);
    }

    #[test]
    fn test_fractional_mpq() {
        let policy = LotSizingPolicy::lot_for_lot().with_mpq(Decimal::new(25, 1));
        let (qty, _) = LotSizingCalculator::apply(&policy, Decimal::new(51, 1));
        assert_eq!(qty, Decimal::new(75, 1));
    }

    proptest! {
        #[test]
        fn prop_mpq_multiple_covers_demand(mpq in 1i64..500, moq in 0i64..1000, adjusted in 1i64..10_000) {
            let (qty, _) = LotSizingCalculator::apply(&policy(0, moq, mpq), Decimal::from(adjusted));

            prop_assert!(qty >= Decimal::from(adjusted));
            if Decimal::from(moq) <= Decimal::from(adjusted) {
                prop_assert_eq!(qty % Decimal::from(mpq), Decimal::ZERO);
            }
        }

        #[test]
        fn prop_reorder_point_precedence(rop in 1i64..1000, moq in 0i64..1000, mpq in 0i64..100, adjusted in 1i64..10_000) {
            let (qty, rule) = LotSizingCalculator::apply(&policy(rop, moq, mpq), Decimal::from(adjusted));
            prop_assert_eq!(qty, Decimal::from(rop + adjusted));
            prop_assert_eq!(rule, LotSizingRule::ReorderPoint);
        }
    }
}
