//! 由已解析文件建立查詢表
//!
//! 所有建立函數都是純函數：只讀取表頭列之後的資料列，鍵值欄位空白的列直接略過，
//! 數值欄位無法解析時視為 0。

use mrp_core::calendar::parse_date_cell;
use mrp_core::{
    BomEdge, BomLookup, CellValue, ColumnRole, MaterialMasterEntry, Result, SupplierEntry,
    TabularDocument, WeekCalendar,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::schema::ResolvedSchema;

/// 物料主檔查詢表（同一料號以最後一列為準）
pub fn build_material_master(
    doc: &TabularDocument,
    schema: &ResolvedSchema,
) -> HashMap<String, MaterialMasterEntry> {
    let mut lookup = HashMap::new();
    if let Err(err) = schema.require(ColumnRole::Material) {
        tracing::warn!("物料主檔無法建立: {}", err);
        return lookup;
    }

    for row in schema.data_rows(doc) {
        let material = schema.text(doc, row, ColumnRole::Material);
        if material.is_empty() {
            continue;
        }

        let quantity = |role| non_negative(schema.number(doc, row, role));
        let entry = MaterialMasterEntry::new(
            quantity(ColumnRole::OnHand),
            quantity(ColumnRole::PendingPo),
        )
        .with_mpq(quantity(ColumnRole::Mpq))
        .with_moq(quantity(ColumnRole::Moq))
        .with_reorder_point(quantity(ColumnRole::ReorderPoint))
        .with_description(schema.text(doc, row, ColumnRole::Description));

        lookup.insert(material, entry);
    }

    tracing::debug!("物料主檔 {} 筆", lookup.len());
    lookup
}

/// 供應商查詢表（同一料號取總交期最短者，同交期保留先出現者）
pub fn build_supplier_lookup(
    doc: &TabularDocument,
    schema: &ResolvedSchema,
) -> HashMap<String, SupplierEntry> {
    let mut lookup: HashMap<String, SupplierEntry> = HashMap::new();
    if let Err(err) = schema.require(ColumnRole::SupplierMaterial) {
        tracing::warn!("供應商交期無法建立: {}", err);
        return lookup;
    }

    for row in schema.data_rows(doc) {
        let material = schema.text(doc, row, ColumnRole::SupplierMaterial);
        if material.is_empty() {
            continue;
        }

        let candidate = SupplierEntry::new(
            schema.text(doc, row, ColumnRole::VendorName),
            schema.number(doc, row, ColumnRole::VendorLeadTime),
            schema.number(doc, row, ColumnRole::TransportDays),
        );

        match lookup.get(&material) {
            Some(existing) if !candidate.is_shorter_than(existing) => {}
            _ => {
                lookup.insert(material, candidate);
            }
        }
    }

    tracing::debug!("供應商交期 {} 筆", lookup.len());
    lookup
}

/// BOM 查詢表
///
/// 子件清單包含所有子件欄位非空白的列（即使用量無效），展開只使用有效關係。
pub fn build_bom(doc: &TabularDocument, schema: &ResolvedSchema) -> Result<BomLookup> {
    schema.require(ColumnRole::ChildPart)?;
    schema.require(ColumnRole::DerivedMaterial)?;
    schema.require(ColumnRole::QuantityPerUnit)?;

    let mut bom = BomLookup::new();
    let mut skipped = 0usize;

    for row in schema.data_rows(doc) {
        let child = schema.text(doc, row, ColumnRole::ChildPart);
        if child.is_empty() {
            continue;
        }

        bom.register_child(
            &child,
            &schema.text(doc, row, ColumnRole::Uom),
            &schema.text(doc, row, ColumnRole::ChildDescription),
        );

        let edge = BomEdge::new(
            schema.text(doc, row, ColumnRole::DerivedMaterial),
            child,
            schema.number(doc, row, ColumnRole::QuantityPerUnit),
        );
        if !bom.add_edge(edge) {
            skipped += 1;
        }
    }

    tracing::debug!(
        "BOM 子件 {} 個，有效關係 {} 筆，略過 {} 筆",
        bom.children().len(),
        bom.edge_count(),
        skipped
    );
    Ok(bom)
}

/// 週次日曆（同一週次以第一列為準，日期無法解析時該週改用推算規則）
pub fn build_week_calendar(doc: &TabularDocument, schema: &ResolvedSchema) -> WeekCalendar {
    let mut calendar = WeekCalendar::new(doc.sheet_name.clone());
    let (Some(week_column), Some(date_column)) = (
        schema.column(ColumnRole::WeekNumber),
        schema.column(ColumnRole::StartDate),
    ) else {
        tracing::warn!("週次表 '{}' 缺少週次或起始日欄位，改用推算規則", doc.sheet_name);
        return calendar;
    };

    for row in schema.data_rows(doc) {
        let Some(week) = week_number(doc.cell(row, week_column)) else {
            continue;
        };
        calendar.insert_first(week, parse_date_cell(doc.cell(row, date_column)));
    }

    tracing::debug!("週次表 {} 週", calendar.len());
    calendar
}

/// 週次儲存格：數值取整數部分，文字取第一段數字（如 `WK05`）
pub fn week_number(cell: &CellValue) -> Option<u32> {
    match cell {
        CellValue::Number(value) if value.is_finite() && *value >= 1.0 => Some(value.trunc() as u32),
        CellValue::Text(text) => {
            let digits: String = text
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok().filter(|week| *week > 0)
        }
        _ => None,
    }
}

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resolve_header;
    use chrono::NaiveDate;
    use mrp_core::{row, DocumentType, MrpError};
    use rstest::rstest;

    fn resolved(doc: &TabularDocument, document_type: DocumentType) -> ResolvedSchema {
        resolve_header(doc, document_type)
    }

    #[test]
    fn test_material_master() {
        let doc = TabularDocument::new(
            "Material Master",
            vec![
                row!["Material", "Description", "MPQ", "MOQ", "Reorder Point", "On Hand", "Pending PO"],
                row![" RM-1 ", "Bolt", 10, 100, 0, 30, "20"],
                row!["", "orphan", 1, 1, 1, 1, 1],
                row!["RM-2", "Nut", "n/a", -5, 0, 0, 0],
                row!["RM-1", "Bolt v2", 25, 0, 0, 5, 0],
            ],
        );
        let master = build_material_master(&doc, &resolved(&doc, DocumentType::MaterialMaster));

        assert_eq!(master.len(), 2);
        let rm1 = &master["RM-1"];
        assert_eq!(rm1.mpq, Decimal::from(25));
        assert_eq!(rm1.description, "Bolt v2");
        assert_eq!(rm1.excess_qty(), Decimal::from(5));

        let rm2 = &master["RM-2"];
        assert_eq!(rm2.mpq, Decimal::ZERO);
        assert_eq!(rm2.moq, Decimal::ZERO);
    }

    #[test]
    fn test_material_master_without_key_column() {
        let doc = TabularDocument::new("Master", vec![row!["MPQ", "MOQ"], row![1, 2]]);
        let master = build_material_master(&doc, &resolved(&doc, DocumentType::MaterialMaster));
        assert!(master.is_empty());
    }

    #[test]
    fn test_supplier_keeps_shortest_lead_time() {
        let doc = TabularDocument::new(
            "Supplier",
            vec![
                row!["Material", "Vendor Name", "Vendor Lead Time", "Transport Days"],
                row!["RM-1", "SLOW", 20, 5],
                row!["RM-1", "FAST", 10, 2],
                row!["RM-1", "TIE", 7, 5],
                row!["RM-2", "ONLY", "14", ""],
            ],
        );
        let suppliers = build_supplier_lookup(&doc, &resolved(&doc, DocumentType::SupplierDetails));

        assert_eq!(suppliers["RM-1"].vendor_name, "FAST");
        assert_eq!(suppliers["RM-1"].total_lead_time, Decimal::from(12));
        assert_eq!(suppliers["RM-2"].total_lead_time, Decimal::from(14));
    }

    #[test]
    fn test_bom() {
        let doc = TabularDocument::new(
            "BOM",
            vec![
                row!["Derived Material", "Child Part", "Quantity Per Kit", "UOM"],
                row!["FG-1", "RM-1", 2, "PCS"],
                row!["FG-1", "RM-2", 0, "PCS"],
                row!["FG-2", "RM-1", 1.5, ""],
                row!["FG-2", "", 3, "PCS"],
            ],
        );
        let bom = build_bom(&doc, &resolved(&doc, DocumentType::Bom)).unwrap();

        assert_eq!(bom.children(), &["RM-1".to_string(), "RM-2".to_string()]);
        assert_eq!(bom.edge_count(), 2);
        assert_eq!(bom.edges_for("FG-2")[0].quantity_per_parent_unit, Decimal::new(15, 1));
        assert_eq!(bom.attributes("RM-1").unwrap().uom, "PCS");
    }

    #[test]
    fn test_bom_missing_column() {
        let doc = TabularDocument::new("BOM", vec![row!["Derived Material", "Child Part"]]);
        let err = build_bom(&doc, &resolved(&doc, DocumentType::Bom)).unwrap_err();
        assert!(matches!(
            err,
            MrpError::ColumnNotFound {
                role: ColumnRole::QuantityPerUnit,
                ..
            }
        ));
    }

    #[test]
    fn test_week_calendar() {
        let doc = TabularDocument::new(
            "Week Plan",
            vec![
                row!["Week", "Start Date", "End Date"],
                row!["WK05", 45320, 45326],
                row![5, "2024-02-01", ""],
                row![6, "sometime", ""],
                row!["", "2024-03-01", ""],
            ],
        );
        let calendar = build_week_calendar(&doc, &resolved(&doc, DocumentType::WeekPlan));

        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar.start_date(5), NaiveDate::from_ymd_opt(2024, 1, 29));
        assert_eq!(calendar.start_date(6), None);
    }

    #[rstest]
    #[case(CellValue::Number(5.0), Some(5))]
    #[case(CellValue::Number(5.9), Some(5))]
    #[case(CellValue::Number(0.0), None)]
    #[case(CellValue::Text("WK 12".to_string()), Some(12))]
    #[case(CellValue::Text("05".to_string()), Some(5))]
    #[case(CellValue::Text("week".to_string()), None)]
    #[case(CellValue::Empty, None)]
    fn test_week_number(#[case] cell: CellValue, #[case] expected: Option<u32>) {
        assert_eq!(week_number(&cell), expected);
    }
}
