//! 交期計算：需求期別 → 採購下單日期

use chrono::{Days, NaiveDate};
use mrp_core::{Period, WeekCalendar, NO_PO_DATE};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 採購日期輸出格式（`DD-Mon-YY`）
pub const PO_DATE_FORMAT: &str = "%d-%b-%y";

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 計算下單日期（需求日往前推交期天數，小數天數捨去）
    pub fn calculate_order_date(
        period: &Period,
        lead_time_days: Decimal,
        calendar: &WeekCalendar,
    ) -> Option<NaiveDate> {
        let required_by = calendar.required_by(period)?;
        let days = lead_time_days.trunc().to_i64().unwrap_or(0);
        if days >= 0 {
            required_by.checked_sub_days(Days::new(days.unsigned_abs()))
        } else {
            required_by.checked_add_days(Days::new(days.unsigned_abs()))
        }
    }

    /// 格式化的採購日期；不需下單或日期無法計算時為 `-`
    pub fn schedule_date(
        period: &Period,
        lead_time_days: Decimal,
        required_qty: Decimal,
        calendar: &WeekCalendar,
    ) -> String {
        if required_qty <= Decimal::ZERO {
            return NO_PO_DATE.to_string();
        }

        match Self::calculate_order_date(period, lead_time_days, calendar) {
            Some(date) => date.format(PO_DATE_FORMAT).to_string(),
            None => {
                tracing::debug!("期別 {} 無法計算採購日期", period);
                NO_PO_DATE.to_string()
            }
        }
    }
}
