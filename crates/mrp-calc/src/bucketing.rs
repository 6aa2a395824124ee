//! 期別分桶：由生產計劃表頭的期別欄位選出計劃視窗

use mrp_core::{Period, PeriodWindow};

/// 期別分桶計算器
pub struct BucketingCalculator;

impl BucketingCalculator {
    /// 視窗內的期別（保留表頭順序，重複欄位只取一次）
    pub fn select_periods(all_periods: &[Period], window: &PeriodWindow) -> Vec<Period> {
        let mut selected = Vec::new();
        for period in all_periods.iter().filter(|p| window.contains(p)) {
            if !selected.contains(period) {
                selected.push(*period);
            }
        }
        selected
    }

    /// 表頭上出現過的年份（供呼叫端調整視窗）
    pub fn years(all_periods: &[Period]) -> Vec<i32> {
        let mut years: Vec<i32> = all_periods.iter().map(|p| p.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<Period> {
        vec![
            Period::new(52, 2023),
            Period::new(2, 2024),
            Period::new(1, 2024),
            Period::new(10, 2024),
            Period::new(2, 2024),
        ]
    }

    #[test]
    fn test_select_periods_keeps_header_order() {
        let selected = BucketingCalculator::select_periods(&header(), &PeriodWindow::new(2024, 1, 5));
        assert_eq!(selected, vec![Period::new(2, 2024), Period::new(1, 2024)]);
    }

    #[test]
    fn test_select_periods_other_year() {
        let selected = BucketingCalculator::select_periods(&header(), &PeriodWindow::full_year(2023));
        assert_eq!(selected, vec![Period::new(52, 2023)]);
    }

    #[test]
    fn test_years() {
        assert_eq!(BucketingCalculator::years(&header()), vec![2023, 2024]);
        assert!(BucketingCalculator::years(&[]).is_empty());
    }
}
