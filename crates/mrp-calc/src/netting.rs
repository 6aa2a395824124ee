//! 淨需求計算
//!
//! 可抵用數量（現有 + 在途）依需求寫入順序逐期扣抵。順序為生產計劃表頭的欄位
//! 順序，不重新依週次排序。

use mrp_core::{LotSizingPolicy, LotSizingRule, Period, PeriodSeries};
use rust_decimal::Decimal;

use crate::lot_sizing::LotSizingCalculator;

/// 淨需求計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct NetRequirement {
    /// 期別
    pub period: Period,
    /// 毛需求
    pub gross_requirement: Decimal,
    /// 本期扣抵的可抵用數量
    pub consumed_excess: Decimal,
    /// 扣抵後的調整需求
    pub adjusted_demand: Decimal,
    /// 期末剩餘可抵用數量
    pub remaining_excess: Decimal,
    /// 建議訂購量
    pub required_qty: Decimal,
    /// 套用的批量規則
    pub rule: LotSizingRule,
}

impl NetRequirement {
    /// 創建新的淨需求記錄（無需求）
    pub fn new(period: Period, remaining_excess: Decimal) -> Self {
        Self {
            period,
            gross_requirement: Decimal::ZERO,
            consumed_excess: Decimal::ZERO,
            adjusted_demand: Decimal::ZERO,
            remaining_excess,
            required_qty: Decimal::ZERO,
            rule: LotSizingRule::None,
        }
    }
}

/// 扣抵狀態（在期別之間傳遞）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NettingState {
    pub remaining_excess: Decimal,
}

impl NettingState {
    pub fn new(excess_qty: Decimal) -> Self {
        Self {
            remaining_excess: excess_qty.max(Decimal::ZERO),
        }
    }

    /// 處理單一期別，回傳新狀態與該期結果
    pub fn step(
        self,
        period: Period,
        gross: Decimal,
        policy: &LotSizingPolicy,
    ) -> (Self, NetRequirement) {
        if gross <= Decimal::ZERO {
            let mut record = NetRequirement::new(period, self.remaining_excess);
            record.gross_requirement = gross;
            return (self, record);
        }

        let consumed = gross.min(self.remaining_excess);
        let remaining_excess = self.remaining_excess - consumed;
        let adjusted_demand = gross - consumed;
        let (required_qty, rule) = LotSizingCalculator::apply(policy, adjusted_demand);

        let record = NetRequirement {
            period,
            gross_requirement: gross,
            consumed_excess: consumed,
            adjusted_demand,
            remaining_excess,
            required_qty,
            rule,
        };
        (Self { remaining_excess }, record)
    }
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算單一物料各期的淨需求與建議訂購量
    pub fn calculate(
        series: &PeriodSeries,
        excess_qty: Decimal,
        policy: &LotSizingPolicy,
    ) -> Vec<NetRequirement> {
        let (_, records) = series.iter().fold(
            (NettingState::new(excess_qty), Vec::with_capacity(series.len())),
            |(state, mut records), (period, gross)| {
                let (next, record) = state.step(*period, *gross, policy);
                records.push(record);
                (next, records)
            },
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(entries: &[(u32, i64)]) -> PeriodSeries {
        entries
            .iter()
            .map(|(week, qty)| (Period::new(*week, 2024), Decimal::from(*qty)))
            .collect()
    }

    #[test]
    fn test_excess_absorbs_first_periods() {
        let records = NettingCalculator::calculate(
            &series(&[(5, 30), (6, 30), (7, 30)]),
            Decimal::from(50),
            &LotSizingPolicy::lot_for_lot(),
        );

        let adjusted: Vec<_> = records.iter().map(|r| r.adjusted_demand).collect();
        assert_eq!(adjusted, vec![Decimal::ZERO, Decimal::from(10), Decimal::from(30)]);

        let remaining: Vec<_> = records.iter().map(|r| r.remaining_excess).collect();
        assert_eq!(remaining, vec![Decimal::from(20), Decimal::ZERO, Decimal::ZERO]);

        assert_eq!(records[0].required_qty, Decimal::ZERO);
        assert_eq!(records[0].rule, LotSizingRule::None);
        assert_eq!(records[1].required_qty, Decimal::from(10));
    }

    #[test]
    fn test_exact_absorption() {
        let records = NettingCalculator::calculate(
            &series(&[(5, 50)]),
            Decimal::from(50),
            &LotSizingPolicy::lot_for_lot().with_moq(Decimal::from(100)),
        );
        assert_eq!(records[0].adjusted_demand, Decimal::ZERO);
        assert_eq!(records[0].required_qty, Decimal::ZERO);
    }

    #[test]
    fn test_zero_demand_leaves_excess_untouched() {
        let records = NettingCalculator::calculate(
            &series(&[(5, 0), (6, 40)]),
            Decimal::from(10),
            &LotSizingPolicy::lot_for_lot(),
        );
        assert_eq!(records[0].remaining_excess, Decimal::from(10));
        assert_eq!(records[1].consumed_excess, Decimal::from(10));
        assert_eq!(records[1].required_qty, Decimal::from(30));
    }

    #[test]
    fn test_column_order_not_week_order() {
        // 表頭先出現第 7 週，可抵用數量先扣在第 7 週
        let records = NettingCalculator::calculate(
            &series(&[(7, 40), (5, 40)]),
            Decimal::from(40),
            &LotSizingPolicy::lot_for_lot(),
        );
        assert_eq!(records[0].period, Period::new(7, 2024));
        assert_eq!(records[0].required_qty, Decimal::ZERO);
        assert_eq!(records[1].required_qty, Decimal::from(40));
    }

    proptest! {
        #[test]
        fn prop_excess_conservation(
            excess in 0i64..500,
            demands in proptest::collection::vec(0i64..200, 0..12),
        ) {
            let entries: Vec<(u32, i64)> = demands
                .iter()
                .enumerate()
                .map(|(i, qty)| (i as u32 + 1, *qty))
                .collect();
            let records = NettingCalculator::calculate(
                &series(&entries),
                Decimal::from(excess),
                &LotSizingPolicy::lot_for_lot(),
            );

            let consumed: Decimal = records.iter().map(|r| r.consumed_excess).sum();
            prop_assert!(consumed <= Decimal::from(excess));

            let mut previous = Decimal::from(excess);
            for record in &records {
                prop_assert!(record.remaining_excess <= previous);
                prop_assert!(record.remaining_excess >= Decimal::ZERO);
                prop_assert!(record.consumed_excess <= record.gross_requirement.max(Decimal::ZERO));
                previous = record.remaining_excess;
            }
        }
    }
}
