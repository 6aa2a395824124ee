//! MRP 主計算器

use mrp_core::{
    BomLookup, DocumentType, MaterialMasterEntry, MrpError, MrpPlan, MrpRow, MrpSettings,
    Period, PeriodSeries, PeriodWindow, SupplierEntry, TabularDocument, WeekCalendar,
    WeeklyRequirement,
};
use mrp_sheet::{
    build_bom, build_material_master, build_supplier_lookup, build_week_calendar, SchemaResolver,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::bucketing::BucketingCalculator;
use crate::explode::DemandExploder;
use crate::lead_time::LeadTimeCalculator;
use crate::netting::NettingCalculator;
use crate::{MrpResult, MrpWarning};

/// 計算輸入（已選定工作表的文件）
#[derive(Debug, Clone, Default)]
pub struct MrpInputs {
    pub bom: TabularDocument,
    pub material_master: TabularDocument,
    pub production_plan: TabularDocument,
    pub supplier_details: TabularDocument,
    /// 週次表（可選，缺少時以推算規則計算需求日）
    pub week_plan: Option<TabularDocument>,
}

impl MrpInputs {
    /// 依文件類型取得文件
    pub fn document(&self, document_type: DocumentType) -> Option<&TabularDocument> {
        match document_type {
            DocumentType::Bom => Some(&self.bom),
            DocumentType::MaterialMaster => Some(&self.material_master),
            DocumentType::ProductionPlan => Some(&self.production_plan),
            DocumentType::SupplierDetails => Some(&self.supplier_details),
            DocumentType::WeekPlan => self.week_plan.as_ref(),
        }
    }

    /// 檢查必要文件（依序：BOM、生產計劃、物料主檔、供應商交期）
    pub fn validate(&self) -> mrp_core::Result<()> {
        for document in [DocumentType::Bom, DocumentType::ProductionPlan] {
            if self.document(document).map_or(true, TabularDocument::is_empty) {
                return Err(MrpError::MissingSource { document });
            }
        }
        for document in [DocumentType::MaterialMaster, DocumentType::SupplierDetails] {
            if self.document(document).map_or(true, TabularDocument::is_empty) {
                return Err(MrpError::MissingReference { document });
            }
        }
        Ok(())
    }
}

/// 單一物料計算所需的共用查詢表
struct Lookups<'a> {
    bom: &'a BomLookup,
    master: &'a HashMap<String, MaterialMasterEntry>,
    suppliers: &'a HashMap<String, SupplierEntry>,
    calendar: &'a WeekCalendar,
    selected: &'a [Period],
}

/// MRP 計算器
#[derive(Debug, Clone, Default)]
pub struct MrpCalculator {
    settings: MrpSettings,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器
    pub fn new(settings: MrpSettings) -> Self {
        Self { settings }
    }

    /// 主 MRP 計算入口
    pub fn calculate(
        &self,
        inputs: &MrpInputs,
        window: &PeriodWindow,
    ) -> mrp_core::Result<MrpResult> {
        inputs.validate()?;

        tracing::info!(
            "開始 MRP 計算：{} 年第 {}-{} 週",
            window.year,
            window.start_week,
            window.end_week
        );
        let start_time = std::time::Instant::now();
        let resolver = SchemaResolver::new(self.settings.scan);

        // Step 1: BOM（必要欄位缺少即中止）
        tracing::debug!("Step 1: 解析 BOM");
        let bom_schema = resolver.resolve(&inputs.bom, DocumentType::Bom);
        let bom = build_bom(&inputs.bom, &bom_schema)?;

        // Step 2: 參考資料
        tracing::debug!("Step 2: 建立物料主檔、供應商、週次表");
        let master_schema = resolver.resolve(&inputs.material_master, DocumentType::MaterialMaster);
        let master = build_material_master(&inputs.material_master, &master_schema);

        let supplier_schema =
            resolver.resolve(&inputs.supplier_details, DocumentType::SupplierDetails);
        let suppliers = build_supplier_lookup(&inputs.supplier_details, &supplier_schema);

        let calendar = match inputs.week_plan.as_ref().filter(|doc| !doc.is_empty()) {
            Some(doc) => build_week_calendar(doc, &resolver.resolve(doc, DocumentType::WeekPlan)),
            None => WeekCalendar::fallback_calendar(),
        };

        // Step 3: 期別分桶
        tracing::debug!("Step 3: 期別分桶");
        let plan_schema = resolver.resolve(&inputs.production_plan, DocumentType::ProductionPlan);
        let all_periods = plan_schema.periods();
        let selected = BucketingCalculator::select_periods(&all_periods, window);
        tracing::debug!("表頭期別 {} 個，視窗內 {} 個", all_periods.len(), selected.len());

        // Step 4: 需求展開
        tracing::debug!("Step 4: 需求展開");
        let demand =
            DemandExploder::explode(&inputs.production_plan, &plan_schema, &bom, &selected);

        // Step 5: 逐物料淨需求、批量、交期
        tracing::debug!("Step 5: 逐物料計算（{} 個子件）", bom.children().len());
        let lookups = Lookups {
            bom: &bom,
            master: &master,
            suppliers: &suppliers,
            calendar: &calendar,
            selected: &selected,
        };
        let compute = |material: &String| {
            Self::calculate_material(material, demand.series(material), &lookups)
        };
        let computed: Vec<(MrpRow, Vec<MrpWarning>)> = if self.settings.parallel {
            bom.children().par_iter().map(compute).collect()
        } else {
            bom.children().iter().map(compute).collect()
        };

        let mut rows = Vec::with_capacity(computed.len());
        let mut warnings = Vec::new();
        for (row, row_warnings) in computed {
            rows.push(row);
            warnings.extend(row_warnings);
        }

        let mut result = MrpResult::new(MrpPlan {
            rows,
            selected_periods: selected,
            all_periods,
        });
        if result.plan.selected_periods.is_empty() {
            result.add_warning(MrpWarning::info(
                String::new(),
                format!(
                    "生產計劃在 {} 年第 {}-{} 週沒有期別欄位",
                    window.year, window.start_week, window.end_week
                ),
            ));
        }
        for warning in warnings {
            result.add_warning(warning);
        }
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("MRP 計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "物料 {} 個，需下單 {} 個，警告 {} 筆",
            result.plan.rows.len(),
            result.plan.rows_with_orders().count(),
            result.warnings.len()
        );

        Ok(result)
    }

    /// 單物料計算
    fn calculate_material(
        material: &str,
        series: Option<&PeriodSeries>,
        lookups: &Lookups<'_>,
    ) -> (MrpRow, Vec<MrpWarning>) {
        let mut warnings = Vec::new();

        let entry = match lookups.master.get(material) {
            Some(entry) => entry.clone(),
            None => {
                warnings.push(MrpWarning::warning(
                    material.to_string(),
                    "物料主檔無此料號，庫存與批量參數以 0 計算".to_string(),
                ));
                MaterialMasterEntry::default()
            }
        };

        let supplier = lookups.suppliers.get(material);
        if supplier.is_none() {
            warnings.push(MrpWarning::warning(
                material.to_string(),
                "無供應商交期資料，交期以 0 天計算".to_string(),
            ));
        }
        let lead_time_days = supplier.map_or(Decimal::ZERO, |s| s.total_lead_time);

        let attributes = lookups.bom.attributes(material).cloned().unwrap_or_default();
        let description = if entry.description.is_empty() {
            attributes.description
        } else {
            entry.description.clone()
        };

        let empty = PeriodSeries::new();
        let series = series.unwrap_or(&empty);
        let excess_qty = entry.excess_qty();

        let mut weekly: Vec<WeeklyRequirement> =
            NettingCalculator::calculate(series, excess_qty, &entry.lot_sizing_policy())
                .into_iter()
                .map(|record| WeeklyRequirement {
                    po_date: LeadTimeCalculator::schedule_date(
                        &record.period,
                        lead_time_days,
                        record.required_qty,
                        lookups.calendar,
                    ),
                    period: record.period,
                    demand: record.gross_requirement,
                    consumed_excess: record.consumed_excess,
                    adjusted_demand: record.adjusted_demand,
                    required_qty: record.required_qty,
                    rule: record.rule,
                })
                .collect();

        // 視窗內無需求的期別補零
        for period in lookups.selected {
            if !series.contains(period) {
                weekly.push(WeeklyRequirement::idle(*period));
            }
        }

        let row = MrpRow {
            material: material.to_string(),
            description,
            uom: attributes.uom,
            vendor_name: supplier.map(|s| s.vendor_name.clone()).unwrap_or_default(),
            lead_time_days,
            mpq: entry.mpq,
            moq: entry.moq,
            reorder_point: entry.reorder_point,
            on_hand: entry.on_hand,
            pending_po: entry.pending_po,
            excess_qty,
            total_demand: series.total_within(lookups.selected),
            weekly,
        };
        (row, warnings)
    }
}

/// 以預設設定計算 MRP
pub fn compute_mrp(inputs: &MrpInputs, window: &PeriodWindow) -> mrp_core::Result<MrpPlan> {
    MrpCalculator::default()
        .calculate(inputs, window)
        .map(|result| result.plan)
}
