//! 儲存格、工作表與活頁簿模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 原始儲存格值（未判定欄位意義）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// 空白
    #[default]
    Empty,
    /// 數值（日期儲存格保留試算表序號）
    Number(f64),
    /// 文字
    Text(String),
    /// 布林
    Bool(bool),
}

impl CellValue {
    /// 儲存格的顯示文字
    ///
    /// 整數值不帶小數點，例如料號 `10001234` 不會變成 `10001234.0`。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.is_finite() && *n == n.trunc() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// 去除前後空白的顯示文字（作為物料鍵值）
    pub fn trimmed(&self) -> String {
        self.as_text().trim().to_string()
    }

    /// 是否為空白（含只有空白字元的文字）
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 數值轉換
    ///
    /// 先取原生數值，再嘗試解析去空白後的文字；無法解析或非有限值一律為 0。
    pub fn to_number(&self) -> f64 {
        let value = match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
        };

        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// 轉為 Decimal（轉換失敗為 0）
    pub fn to_decimal(&self) -> Decimal {
        Decimal::try_from(self.to_number()).unwrap_or_default()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// 列 → 欄 → 儲存格
pub type Grid = Vec<Vec<CellValue>>;

/// 單一工作表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// 工作表名稱
    pub name: String,
    /// 原始資料
    pub grid: Grid,
}

impl Sheet {
    /// 創建工作表
    pub fn new(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// 原始活頁簿（保留工作表順序，順序即同分時的優先序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorkbook {
    pub sheets: Vec<Sheet>,
}

impl RawWorkbook {
    /// 創建空活頁簿
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入工作表
    pub fn with_sheet(mut self, name: impl Into<String>, grid: Grid) -> Self {
        self.sheets.push(Sheet::new(name, grid));
        self
    }

    /// 第一個工作表名稱
    pub fn first_sheet_name(&self) -> Option<&str> {
        self.sheets.first().map(|s| s.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// 選定工作表後的表格文件（尚未判定表頭列）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularDocument {
    /// 選定的工作表名稱
    pub sheet_name: String,
    /// 原始資料
    pub grid: Grid,
}

impl TabularDocument {
    /// 創建表格文件
    pub fn new(sheet_name: impl Into<String>, grid: Grid) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            grid,
        }
    }

    /// 空文件（表示「找不到可用工作表」）
    pub fn empty(sheet_name: impl Into<String>) -> Self {
        Self::new(sheet_name, Vec::new())
    }

    /// 是否沒有任何非空白儲存格
    pub fn is_empty(&self) -> bool {
        self.grid
            .iter()
            .all(|row| row.iter().all(CellValue::is_blank))
    }

    /// 列數
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    /// 取得一列
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.grid.get(index).map(Vec::as_slice)
    }

    /// 取得儲存格（越界視為空白）
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.grid
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

/// 以字面值快速建立一列（測試與範例用）
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::CellValue::from($cell)),*]
    };
}
