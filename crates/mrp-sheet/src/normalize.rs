//! 表頭文字正規化（評分與欄位解析共用）

use mrp_core::CellValue;

/// 正規化：小寫、底線轉空白、連續空白合併為一個
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 正規化儲存格文字
pub fn normalize_cell(cell: &CellValue) -> String {
    normalize(&cell.as_text())
}

/// 去除所有空白的正規化文字（評分時忽略空白差異）
pub fn compact(text: &str) -> String {
    normalize(text).chars().filter(|c| !c.is_whitespace()).collect()
}
