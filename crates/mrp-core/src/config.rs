//! MRP 配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 物料批量政策（取自物料主檔）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LotSizingPolicy {
    /// 最小包裝量（訂購倍數）
    pub mpq: Decimal,

    /// 最小訂購量
    pub moq: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,
}

impl LotSizingPolicy {
    /// 創建批量政策
    pub fn new(mpq: Decimal, moq: Decimal, reorder_point: Decimal) -> Self {
        Self {
            mpq,
            moq,
            reorder_point,
        }
    }

    /// 批對批（無任何限制）
    pub fn lot_for_lot() -> Self {
        Self::default()
    }

    /// 建構器模式：設置最小包裝量
    pub fn with_mpq(mut self, mpq: Decimal) -> Self {
        self.mpq = mpq;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_moq(mut self, moq: Decimal) -> Self {
        self.moq = moq;
        self
    }

    /// 建構器模式：設置再訂購點
    pub fn with_reorder_point(mut self, reorder_point: Decimal) -> Self {
        self.reorder_point = reorder_point;
        self
    }
}

/// 實際套用的批量規則（依優先序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotSizingRule {
    /// 無需下單
    None,

    /// 再訂購點 + 調整需求
    ReorderPoint,

    /// 提升至最小訂購量
    MinimumOrder,

    /// 進位至最小包裝量倍數
    PackMultiple,

    /// 批對批（按調整需求訂購）
    LotForLot,
}

/// 工作表掃描範圍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    /// 工作表評分時檢查的列數（表頭假設在前幾列）
    pub sheet_scan_rows: usize,

    /// 表頭列偵測的列數
    pub header_scan_rows: usize,
}

impl ScanLimits {
    /// 建構器模式：設置評分列數
    pub fn with_sheet_scan_rows(mut self, rows: usize) -> Self {
        self.sheet_scan_rows = rows;
        self
    }

    /// 建構器模式：設置表頭偵測列數
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.header_scan_rows = rows;
        self
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            sheet_scan_rows: 15,
            header_scan_rows: 10,
        }
    }
}

/// 引擎設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MrpSettings {
    /// 掃描範圍
    pub scan: ScanLimits,

    /// 是否以多執行緒逐物料計算
    pub parallel: bool,
}

impl MrpSettings {
    /// 建構器模式：設置掃描範圍
    pub fn with_scan_limits(mut self, scan: ScanLimits) -> Self {
        self.scan = scan;
        self
    }

    /// 建構器模式：設置是否並行
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 從 JSON 載入（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MrpError::Settings(e.to_string()))
    }
}

impl Default for MrpSettings {
    fn default() -> Self {
        Self {
            scan: ScanLimits::default(),
            parallel: true,
        }
    }
}
