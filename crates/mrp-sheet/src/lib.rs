//! # MRP Sheet
//!
//! 試算表匯入：讀取活頁簿、選擇工作表、解析表頭、建立查詢表

pub mod lookup;
pub mod normalize;
pub mod reader;
pub mod rules;
pub mod schema;
pub mod selector;

// Re-export 主要類型
pub use lookup::{build_bom, build_material_master, build_supplier_lookup, build_week_calendar};
pub use normalize::normalize;
pub use reader::read_workbook;
pub use schema::{resolve_header, ResolvedSchema, SchemaResolver};
pub use selector::{score_sheets, select_sheet, select_sheet_with, SheetScore, SheetSelector};
