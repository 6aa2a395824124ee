//! 週次日曆模型

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::cell::CellValue;
use crate::period::Period;

/// 試算表日期序號起點（1899-12-30）
pub fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// 試算表日期序號轉日期（小數部分為時間，捨去）
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor();
    if days >= 0.0 {
        serial_epoch().checked_add_days(Days::new(days as u64))
    } else {
        serial_epoch().checked_sub_days(Days::new((-days) as u64))
    }
}

/// 可接受的日期文字格式（依序嘗試）
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// 解析日期文字
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 以文字存放的序號
    if let Ok(serial) = trimmed.parse::<f64>() {
        return serial_to_date(serial);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// 解析日期儲存格（序號或日期文字）
pub fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Number(serial) => serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// 週次日曆（週次 → 起始日）
///
/// 週次表只以週次對照，不區分年份；查無資料或日期無法解析時改用推算規則。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekCalendar {
    /// 週次 → 起始日（None 表示該列日期無法解析）
    weeks: HashMap<u32, Option<NaiveDate>>,

    /// 日曆ID
    pub calendar_id: String,
}

impl WeekCalendar {
    /// 創建空日曆
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            weeks: HashMap::new(),
            calendar_id: calendar_id.into(),
        }
    }

    /// 創建降級日曆（無週次表時使用，全部以推算規則計算）
    pub fn fallback_calendar() -> Self {
        Self::new("FALLBACK")
    }

    /// 登記週次起始日（同一週次以第一筆為準）
    pub fn insert_first(&mut self, week: u32, start_date: Option<NaiveDate>) {
        self.weeks.entry(week).or_insert(start_date);
    }

    /// 建構器模式：加入週次
    pub fn with_week(mut self, week: u32, start_date: NaiveDate) -> Self {
        self.insert_first(week, Some(start_date));
        self
    }

    /// 週次表中的起始日
    pub fn start_date(&self, week: u32) -> Option<NaiveDate> {
        self.weeks.get(&week).copied().flatten()
    }

    /// 推算規則：該年 1 月 1 日 + 週次 × 7 天
    pub fn fallback_date(period: &Period) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(period.year, 1, 1)?
            .checked_add_days(Days::new(u64::from(period.week) * 7))
    }

    /// 期別的需求日期
    pub fn required_by(&self, period: &Period) -> Option<NaiveDate> {
        self.start_date(period.week)
            .or_else(|| Self::fallback_date(period))
    }

    /// 已登記的週次數量
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
