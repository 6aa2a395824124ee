//! 工作表選擇器
//!
//! 對活頁簿中每個工作表的前幾列做關鍵字評分，分數最高者即為該文件類型的
//! 來源工作表。同分時保留活頁簿中較前面的工作表。

use mrp_core::period::is_period_text;
use mrp_core::{DocumentType, RawWorkbook, ScanLimits, Sheet, TabularDocument};
use serde::Serialize;

use crate::normalize::normalize_cell;
use crate::rules::{keyword_rules, period_bonus, Target};

/// 尚未有任何工作表時的分數
const NO_SCORE: i32 = -1;

/// 工作表評分結果（上傳預覽用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetScore {
    pub sheet_name: String,
    pub score: i32,
}

/// 工作表選擇器
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetSelector {
    limits: ScanLimits,
}

impl SheetSelector {
    /// 創建選擇器
    pub fn new(limits: ScanLimits) -> Self {
        Self { limits }
    }

    /// 單一工作表的分數
    pub fn score_sheet(&self, sheet: &Sheet, document_type: DocumentType) -> i32 {
        let cells: Vec<String> = sheet
            .grid
            .iter()
            .take(self.limits.sheet_scan_rows)
            .flatten()
            .filter(|cell| !cell.is_blank())
            .map(normalize_cell)
            .collect();

        let mut score: i32 = keyword_rules(document_type)
            .iter()
            .filter(|rule| match rule.target {
                Target::SheetName => rule.hits(&sheet.name),
                Target::AnyCell => cells.iter().any(|cell| rule.hits(cell)),
            })
            .map(|rule| rule.weight)
            .sum();

        let bonus = period_bonus(document_type);
        if bonus > 0 && cells.iter().any(|cell| is_period_text(cell)) {
            score += bonus;
        }

        score
    }

    /// 所有工作表的分數（活頁簿順序）
    pub fn score_sheets(&self, workbook: &RawWorkbook, document_type: DocumentType) -> Vec<SheetScore> {
        workbook
            .sheets
            .iter()
            .map(|sheet| SheetScore {
                sheet_name: sheet.name.clone(),
                score: self.score_sheet(sheet, document_type),
            })
            .collect()
    }

    /// 選出分數最高的工作表
    ///
    /// 空活頁簿回傳第一個工作表名稱（或空字串）與空資料，由呼叫端判斷是否缺件。
    pub fn select(&self, workbook: &RawWorkbook, document_type: DocumentType) -> TabularDocument {
        let mut best: Option<&Sheet> = None;
        let mut best_score = NO_SCORE;

        for sheet in &workbook.sheets {
            let score = self.score_sheet(sheet, document_type);
            tracing::debug!("{} 候選工作表 '{}' 分數 {}", document_type, sheet.name, score);
            if score > best_score {
                best = Some(sheet);
                best_score = score;
            }
        }

        match best {
            Some(sheet) => {
                tracing::debug!(
                    "{} 選用工作表 '{}'（分數 {}）",
                    document_type,
                    sheet.name,
                    best_score
                );
                TabularDocument::new(sheet.name.clone(), sheet.grid.clone())
            }
            None => {
                tracing::warn!("{} 活頁簿沒有可用的工作表", document_type);
                TabularDocument::empty(workbook.first_sheet_name().unwrap_or_default())
            }
        }
    }
}

/// 以預設掃描列數選擇工作表
pub fn select_sheet(workbook: &RawWorkbook, document_type: DocumentType) -> TabularDocument {
    SheetSelector::default().select(workbook, document_type)
}

/// 以指定掃描列數選擇工作表
pub fn select_sheet_with(
    workbook: &RawWorkbook,
    document_type: DocumentType,
    limits: ScanLimits,
) -> TabularDocument {
    SheetSelector::new(limits).select(workbook, document_type)
}

/// 以預設掃描列數評分所有工作表
pub fn score_sheets(workbook: &RawWorkbook, document_type: DocumentType) -> Vec<SheetScore> {
    SheetSelector::default().score_sheets(workbook, document_type)
}
