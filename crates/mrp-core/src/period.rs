//! 週次期別（`WW.YYYY`）與計劃視窗

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::MrpError;

/// 期別欄位的嚴格格式：兩位數週次、點、四位數年份
fn period_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // 字面值樣式，編譯必定成功
    PATTERN.get_or_init(|| Regex::new(r"^\d{2}\.\d{4}$").expect("period pattern"))
}

/// 文字是否符合期別格式（前後空白不計）
pub fn is_period_text(text: &str) -> bool {
    period_pattern().is_match(text.trim())
}

/// 週次期別
///
/// 排序與比較一律使用抽出的數值（年、週），不使用原始字串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    /// 週次（兩位數）
    pub week: u32,
    /// 年份（四位數）
    pub year: i32,
}

impl Period {
    /// 創建期別
    pub fn new(week: u32, year: i32) -> Self {
        Self { week, year }
    }

    /// 解析 `WW.YYYY`，不符合格式回傳 None
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if !period_pattern().is_match(trimmed) {
            return None;
        }
        let (week, year) = trimmed.split_once('.')?;
        Some(Self {
            week: week.parse().ok()?,
            year: year.parse().ok()?,
        })
    }

    /// 期別鍵值
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:04}", self.week, self.year)
    }
}

impl TryFrom<String> for Period {
    type Error = MrpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value).ok_or(MrpError::InvalidPeriod(value))
    }
}

impl From<Period> for String {
    fn from(value: Period) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for Period {
    type Err = MrpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s).ok_or_else(|| MrpError::InvalidPeriod(s.to_string()))
    }
}

/// 週次下限
pub const MIN_WEEK: u32 = 1;
/// 週次上限
pub const MAX_WEEK: u32 = 53;

/// 計劃視窗（年 + 起訖週次，含端點）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub year: i32,
    pub start_week: u32,
    pub end_week: u32,
}

impl PeriodWindow {
    /// 創建計劃視窗
    ///
    /// 週次夾限在 `[1, 53]`，且迄週不小於起週。
    pub fn new(year: i32, start_week: u32, end_week: u32) -> Self {
        let start_week = start_week.clamp(MIN_WEEK, MAX_WEEK);
        let end_week = end_week.clamp(MIN_WEEK, MAX_WEEK).max(start_week);
        Self {
            year,
            start_week,
            end_week,
        }
    }

    /// 整年視窗
    pub fn full_year(year: i32) -> Self {
        Self::new(year, MIN_WEEK, MAX_WEEK)
    }

    /// 期別是否落在視窗內
    pub fn contains(&self, period: &Period) -> bool {
        period.year == self.year && period.week >= self.start_week && period.week <= self.end_week
    }
}
