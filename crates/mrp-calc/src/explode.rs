//! 需求展開：生產計劃 × BOM → 子件各期毛需求

use mrp_core::{BomEdge, BomLookup, ColumnRole, DemandMap, Period, TabularDocument};
use mrp_sheet::ResolvedSchema;
use rust_decimal::Decimal;

/// 需求展開器
pub struct DemandExploder;

impl DemandExploder {
    /// 展開生產計劃
    ///
    /// 只讀取 `selected` 內的期別欄位；產量不為正的儲存格略過。同一子件同一期別
    /// 來自不同父件或不同列的需求全部加總。
    pub fn explode(
        plan: &TabularDocument,
        schema: &ResolvedSchema,
        bom: &BomLookup,
        selected: &[Period],
    ) -> DemandMap {
        let mut demand = DemandMap::new();

        let Some(material_column) = schema.column(ColumnRole::PlanMaterial) else {
            tracing::warn!("生產計劃 '{}' 找不到物料欄位，無需求可展開", plan.sheet_name);
            return demand;
        };

        let columns: Vec<(usize, Period)> = schema
            .period_columns
            .iter()
            .filter(|(_, period)| selected.contains(period))
            .copied()
            .collect();

        let parents: Vec<(usize, &[BomEdge])> = schema
            .data_rows(plan)
            .filter_map(|row| {
                let parent = plan.cell(row, material_column).trimmed();
                if parent.is_empty() {
                    return None;
                }
                let edges = bom.edges_for(&parent);
                (!edges.is_empty()).then_some((row, edges))
            })
            .collect();

        // 先走期別欄位再走列，子件序列即為表頭期別順序
        for (column, period) in &columns {
            for (row, edges) in &parents {
                let produced = plan.cell(*row, *column).to_decimal();
                if produced <= Decimal::ZERO {
                    continue;
                }
                for edge in edges.iter() {
                    demand.add(
                        &edge.child_material,
                        *period,
                        produced * edge.quantity_per_parent_unit,
                    );
                }
            }
        }

        tracing::debug!("需求展開完成：{} 個子件有需求", demand.material_count());
        demand
    }
}
