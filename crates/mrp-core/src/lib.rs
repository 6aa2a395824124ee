//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod calendar;
pub mod cell;
pub mod config;
pub mod demand;
pub mod document;
pub mod inventory;
pub mod period;
pub mod plan;
pub mod supply;

// Re-export 主要類型
pub use bom::{BomEdge, BomLookup, ChildAttributes};
pub use calendar::WeekCalendar;
pub use cell::{CellValue, Grid, RawWorkbook, Sheet, TabularDocument};
pub use config::{LotSizingPolicy, LotSizingRule, MrpSettings, ScanLimits};
pub use demand::{DemandMap, PeriodSeries};
pub use document::{ColumnRole, DocumentType};
pub use inventory::MaterialMasterEntry;
pub use period::{Period, PeriodWindow};
pub use plan::{MrpPlan, MrpRow, WeeklyRequirement, NO_PO_DATE};
pub use supply::SupplierEntry;

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("缺少來源文件: {document}")]
    MissingSource { document: DocumentType },

    #[error("缺少參考資料: {document}")]
    MissingReference { document: DocumentType },

    #[error("{document} 工作表 '{sheet_name}' 找不到欄位 '{role}'，偵測到的表頭: {headers:?}")]
    ColumnNotFound {
        document: DocumentType,
        role: ColumnRole,
        sheet_name: String,
        headers: Vec<String>,
    },

    #[error("無效的期別: {0}")]
    InvalidPeriod(String),

    #[error("不支援的檔案格式: {0}")]
    UnsupportedFormat(String),

    #[error("活頁簿讀取錯誤: {0}")]
    WorkbookRead(String),

    #[error("快取錯誤: {0}")]
    Cache(String),

    #[error("設定錯誤: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, MrpError>;
