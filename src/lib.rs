//! # Sheet MRP
//!
//! 由試算表匯出檔（BOM、物料主檔、生產計劃、供應商交期、週曆）計算週別 MRP。
//!
//! ```no_run
//! use sheet_mrp::{DocumentLoader, DirectorySource, JsonFileCache, PeriodWindow};
//! use std::sync::Arc;
//!
//! # fn main() -> sheet_mrp::Result<()> {
//! let loader = DocumentLoader::new(
//!     Arc::new(DirectorySource::new("uploads")),
//!     Arc::new(JsonFileCache::open("cache")?),
//! );
//! let result = loader.compute(&PeriodWindow::new(2024, 5, 12))?;
//! println!("{} 筆物料", result.plan.rows.len());
//! # Ok(())
//! # }
//! ```

pub use mrp_cache::{
    CachedDocument, DirectorySource, DocumentCache, DocumentLoader, DocumentOrigin,
    DocumentSource, JsonFileCache, LoadedDocument, LoadedInputs, MemoryDocumentCache,
    MemorySource, SourceFile, UploadPreview,
};
pub use mrp_calc::{
    compute_mrp, DemandExploder, LeadTimeCalculator, LotSizingCalculator, MrpCalculator,
    MrpInputs, MrpResult, MrpWarning, NetRequirement, NettingCalculator, WarningSeverity,
};
pub use mrp_core::{
    BomEdge, BomLookup, CellValue, ColumnRole, DemandMap, DocumentType, Grid, LotSizingPolicy,
    LotSizingRule, MaterialMasterEntry, MrpError, MrpPlan, MrpRow, MrpSettings, Period,
    PeriodWindow, RawWorkbook, Result, ScanLimits, Sheet, SupplierEntry, TabularDocument,
    WeekCalendar, WeeklyRequirement, NO_PO_DATE,
};
pub use mrp_sheet::{
    build_bom, build_material_master, build_supplier_lookup, build_week_calendar, read_workbook,
    resolve_header, score_sheets, select_sheet, select_sheet_with, ResolvedSchema,
    SchemaResolver, SheetScore, SheetSelector,
};

pub use mrp_core::row;
