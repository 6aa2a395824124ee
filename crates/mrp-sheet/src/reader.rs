//! 上傳檔案 → 原始活頁簿
//!
//! `.csv` 以單一工作表讀入（名稱為檔名主幹），試算表格式交給 calamine。
//! 日期儲存格保留序號，由週次表解析時再轉換。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use mrp_core::{CellValue, Grid, MrpError, RawWorkbook, Result, Sheet};
use std::io::Cursor;
use std::path::Path;

/// calamine 支援的副檔名
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// 依副檔名讀取活頁簿
pub fn read_workbook(file_name: &str, bytes: &[u8]) -> Result<RawWorkbook> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let workbook = if extension == "csv" {
        read_csv(file_name, bytes)?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet(bytes)?
    } else {
        return Err(MrpError::UnsupportedFormat(file_name.to_string()));
    };

    tracing::debug!("讀取 '{}'：{} 個工作表", file_name, workbook.sheets.len());
    Ok(workbook)
}

fn read_csv(file_name: &str, bytes: &[u8]) -> Result<RawWorkbook> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(bytes);

    let mut grid: Grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MrpError::WorkbookRead(format!("{file_name}: {e}")))?;
        grid.push(record.iter().map(csv_cell).collect());
    }

    let name = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);

    Ok(RawWorkbook {
        sheets: vec![Sheet::new(name, grid)],
    })
}

fn csv_cell(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}

fn read_spreadsheet(bytes: &[u8]) -> Result<RawWorkbook> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| MrpError::WorkbookRead(e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        match workbook.worksheet_range(&name) {
            Ok(range) => sheets.push(Sheet::new(name, range_to_grid(&range))),
            Err(e) => tracing::warn!("略過工作表 '{}': {}", name, e),
        }
    }

    Ok(RawWorkbook { sheets })
}

fn range_to_grid(range: &Range<Data>) -> Grid {
    range
        .rows()
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect()
}

/// calamine 儲存格轉換
pub fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
