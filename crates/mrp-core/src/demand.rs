//! 需求模型（物料 → 期別 → 毛需求）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::period::Period;

/// 單一物料的期別需求序列
///
/// 依期別首次寫入的順序保存；淨需求計算沿此順序消耗庫存。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSeries {
    entries: Vec<(Period, Decimal)>,
}

impl PeriodSeries {
    /// 創建空序列
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加期別需求
    pub fn add(&mut self, period: Period, quantity: Decimal) {
        match self.entries.iter_mut().find(|(p, _)| *p == period) {
            Some((_, existing)) => *existing += quantity,
            None => self.entries.push((period, quantity)),
        }
    }

    /// 期別需求（未記錄為 None）
    pub fn get(&self, period: &Period) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(p, _)| p == period)
            .map(|(_, qty)| *qty)
    }

    /// 是否記錄過該期別
    pub fn contains(&self, period: &Period) -> bool {
        self.entries.iter().any(|(p, _)| p == period)
    }

    /// 依寫入順序走訪
    pub fn iter(&self) -> impl Iterator<Item = (&Period, &Decimal)> {
        self.entries.iter().map(|(p, q)| (p, q))
    }

    /// 限定期別的需求合計
    pub fn total_within(&self, periods: &[Period]) -> Decimal {
        self.entries
            .iter()
            .filter(|(p, _)| periods.contains(p))
            .map(|(_, q)| *q)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Period, Decimal)> for PeriodSeries {
    fn from_iter<T: IntoIterator<Item = (Period, Decimal)>>(iter: T) -> Self {
        let mut series = PeriodSeries::new();
        for (period, quantity) in iter {
            series.add(period, quantity);
        }
        series
    }
}

/// 物料 → 期別需求
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandMap {
    materials: HashMap<String, PeriodSeries>,
}

impl DemandMap {
    /// 創建空需求表
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加物料期別需求
    pub fn add(&mut self, material: &str, period: Period, quantity: Decimal) {
        self.materials
            .entry(material.to_string())
            .or_default()
            .add(period, quantity);
    }

    /// 物料需求序列
    pub fn series(&self, material: &str) -> Option<&PeriodSeries> {
        self.materials.get(material)
    }

    /// 物料期別需求（未記錄為 0）
    pub fn quantity(&self, material: &str, period: &Period) -> Decimal {
        self.series(material)
            .and_then(|s| s.get(period))
            .unwrap_or(Decimal::ZERO)
    }

    /// 有需求的物料數量
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// 走訪所有物料
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PeriodSeries)> {
        self.materials.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_accumulates_and_keeps_insertion_order() {
        let mut series = PeriodSeries::new();
        series.add(Period::new(7, 2024), Decimal::from(10));
        series.add(Period::new(5, 2024), Decimal::from(4));
        series.add(Period::new(7, 2024), Decimal::from(6));

        let periods: Vec<_> = series.iter().map(|(p, _)| *p).collect();
        assert_eq!(periods, vec![Period::new(7, 2024), Period::new(5, 2024)]);
        assert_eq!(series.get(&Period::new(7, 2024)), Some(Decimal::from(16)));
        assert_eq!(series.get(&Period::new(9, 2024)), None);
    }

    #[test]
    fn test_total_within_selected_periods() {
        let series: PeriodSeries = vec![
            (Period::new(1, 2024), Decimal::from(10)),
            (Period::new(2, 2024), Decimal::from(20)),
            (Period::new(3, 2024), Decimal::from(30)),
        ]
        .into_iter()
        .collect();

        let selected = [Period::new(2, 2024), Period::new(3, 2024)];
        assert_eq!(series.total_within(&selected), Decimal::from(50));
    }

    #[test]
    fn test_demand_map_quantity_defaults_to_zero() {
        let mut demand = DemandMap::new();
        demand.add("RM-1", Period::new(3, 2024), Decimal::from(5));
        demand.add("RM-1", Period::new(3, 2024), Decimal::from(5));

        assert_eq!(demand.quantity("RM-1", &Period::new(3, 2024)), Decimal::from(10));
        assert_eq!(demand.quantity("RM-2", &Period::new(3, 2024)), Decimal::ZERO);
        assert_eq!(demand.material_count(), 1);
    }
}
