//! 表頭解析：定位表頭列並將欄位對應到語意角色

use mrp_core::{
    CellValue, ColumnRole, DocumentType, MrpError, Period, Result, ScanLimits, TabularDocument,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::normalize::normalize_cell;
use crate::rules::{column_matchers, header_predicates, RowPredicate};

/// 已解析的文件結構
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSchema {
    /// 文件類型
    pub document_type: DocumentType,

    /// 工作表名稱
    pub sheet_name: String,

    /// 表頭列索引（0 起算）
    pub header_row: usize,

    /// 角色 → 欄位索引（找不到的角色不在表中）
    pub columns: HashMap<ColumnRole, usize>,

    /// 期別欄位（表頭左到右）
    pub period_columns: Vec<(usize, Period)>,

    /// 表頭文字（錯誤診斷用）
    pub headers: Vec<String>,
}

impl ResolvedSchema {
    /// 角色所在欄位
    pub fn column(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    /// 必要欄位，找不到時回傳 [`MrpError::ColumnNotFound`]
    pub fn require(&self, role: ColumnRole) -> Result<usize> {
        self.column(role).ok_or_else(|| MrpError::ColumnNotFound {
            document: self.document_type,
            role,
            sheet_name: self.sheet_name.clone(),
            headers: self.headers.clone(),
        })
    }

    /// 未能對應的必要欄位（上傳時預先檢查用）
    pub fn missing_required(&self) -> Vec<ColumnRole> {
        ColumnRole::for_document(self.document_type)
            .iter()
            .copied()
            .filter(|role| role.is_required() && !self.columns.contains_key(role))
            .collect()
    }

    /// 表頭列之後的資料列索引
    pub fn data_rows(&self, doc: &TabularDocument) -> std::ops::Range<usize> {
        (self.header_row + 1).min(doc.row_count())..doc.row_count()
    }

    /// 角色欄位的去空白文字（找不到欄位為空字串）
    pub fn text(&self, doc: &TabularDocument, row: usize, role: ColumnRole) -> String {
        self.cell(doc, row, role)
            .map(CellValue::trimmed)
            .unwrap_or_default()
    }

    /// 角色欄位的數值（找不到欄位或無法解析為 0）
    pub fn number(&self, doc: &TabularDocument, row: usize, role: ColumnRole) -> Decimal {
        self.cell(doc, row, role)
            .map(CellValue::to_decimal)
            .unwrap_or(Decimal::ZERO)
    }

    /// 期別欄位中的期別（表頭順序）
    pub fn periods(&self) -> Vec<Period> {
        self.period_columns.iter().map(|(_, period)| *period).collect()
    }

    fn cell<'a>(
        &self,
        doc: &'a TabularDocument,
        row: usize,
        role: ColumnRole,
    ) -> Option<&'a CellValue> {
        self.column(role).map(|column| doc.cell(row, column))
    }
}

/// 表頭解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver {
    limits: ScanLimits,
}

impl SchemaResolver {
    /// 創建解析器
    pub fn new(limits: ScanLimits) -> Self {
        Self { limits }
    }

    /// 解析文件的表頭列與欄位
    pub fn resolve(&self, doc: &TabularDocument, document_type: DocumentType) -> ResolvedSchema {
        let header_row = self.find_header_row(doc, document_type);
        let headers: Vec<String> = doc
            .row(header_row)
            .unwrap_or_default()
            .iter()
            .map(normalize_cell)
            .collect();

        let columns: HashMap<ColumnRole, usize> = ColumnRole::for_document(document_type)
            .iter()
            .filter_map(|role| match_column(&headers, *role).map(|column| (*role, column)))
            .collect();

        let period_columns = if document_type == DocumentType::ProductionPlan {
            doc.row(header_row)
                .unwrap_or_default()
                .iter()
                .enumerate()
                .filter_map(|(column, cell)| Period::parse(&cell.trimmed()).map(|p| (column, p)))
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            "{} 工作表 '{}' 表頭列 {}，對應欄位 {} 個，期別欄位 {} 個",
            document_type,
            doc.sheet_name,
            header_row,
            columns.len(),
            period_columns.len()
        );

        ResolvedSchema {
            document_type,
            sheet_name: doc.sheet_name.clone(),
            header_row,
            columns,
            period_columns,
            headers,
        }
    }

    /// 前幾列中第一個符合所有表頭條件的列；都不符合時為第 0 列
    pub fn find_header_row(&self, doc: &TabularDocument, document_type: DocumentType) -> usize {
        let predicates = header_predicates(document_type);
        (0..doc.row_count().min(self.limits.header_scan_rows))
            .find(|&index| {
                let cells: Vec<String> = doc
                    .row(index)
                    .unwrap_or_default()
                    .iter()
                    .map(normalize_cell)
                    .collect();
                predicates.iter().all(|predicate| row_satisfies(&cells, predicate))
            })
            .unwrap_or(0)
    }
}

fn row_satisfies(cells: &[String], predicate: &RowPredicate) -> bool {
    match predicate {
        RowPredicate::AnyContains(keywords) => cells
            .iter()
            .any(|cell| keywords.iter().any(|keyword| cell.contains(keyword))),
        RowPredicate::AnyPeriod => cells.iter().any(|cell| Period::parse(cell).is_some()),
    }
}

/// 依比對器優先序掃描表頭，每個比對器由左到右取第一個符合的欄位
fn match_column(headers: &[String], role: ColumnRole) -> Option<usize> {
    column_matchers(role).iter().find_map(|matcher| {
        headers
            .iter()
            .position(|header| matcher.matches(header))
    })
}

/// 以預設掃描列數解析表頭
pub fn resolve_header(doc: &TabularDocument, document_type: DocumentType) -> ResolvedSchema {
    SchemaResolver::default().resolve(doc, document_type)
}
