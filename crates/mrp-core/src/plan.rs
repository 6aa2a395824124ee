//! MRP 計算結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LotSizingRule;
use crate::period::Period;

/// 無需下單時的採購日期佔位字串
pub const NO_PO_DATE: &str = "-";

/// 單一期別的需求與建議訂購
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRequirement {
    /// 期別
    pub period: Period,

    /// 毛需求
    pub demand: Decimal,

    /// 本期消耗的可抵用庫存
    pub consumed_excess: Decimal,

    /// 扣除庫存後的調整需求
    pub adjusted_demand: Decimal,

    /// 建議訂購量
    pub required_qty: Decimal,

    /// 套用的批量規則
    pub rule: LotSizingRule,

    /// 採購下單日期（`DD-Mon-YY`，無需下單為 `-`）
    pub po_date: String,
}

impl WeeklyRequirement {
    /// 無需求的期別
    pub fn idle(period: Period) -> Self {
        Self {
            period,
            demand: Decimal::ZERO,
            consumed_excess: Decimal::ZERO,
            adjusted_demand: Decimal::ZERO,
            required_qty: Decimal::ZERO,
            rule: LotSizingRule::None,
            po_date: NO_PO_DATE.to_string(),
        }
    }

    /// 是否需要下單
    pub fn needs_order(&self) -> bool {
        self.required_qty > Decimal::ZERO
    }
}

/// 單一子件的 MRP 結果列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrpRow {
    /// 物料
    pub material: String,

    /// 物料描述
    pub description: String,

    /// 單位
    pub uom: String,

    /// 供應商
    pub vendor_name: String,

    /// 總交期（天）
    pub lead_time_days: Decimal,

    pub mpq: Decimal,
    pub moq: Decimal,
    pub reorder_point: Decimal,
    pub on_hand: Decimal,
    pub pending_po: Decimal,

    /// 可抵用數量 = 現有 + 在途
    pub excess_qty: Decimal,

    /// 計劃視窗內的需求合計
    pub total_demand: Decimal,

    /// 各期結果（先依需求寫入順序，再補上視窗內無需求的期別）
    pub weekly: Vec<WeeklyRequirement>,
}

impl MrpRow {
    /// 期別結果
    pub fn week(&self, period: &Period) -> Option<&WeeklyRequirement> {
        self.weekly.iter().find(|w| w.period == *period)
    }

    /// 期別毛需求
    pub fn weekly_demand(&self, period: &Period) -> Decimal {
        self.week(period).map(|w| w.demand).unwrap_or(Decimal::ZERO)
    }

    /// 期別建議訂購量
    pub fn weekly_required_qty(&self, period: &Period) -> Decimal {
        self.week(period)
            .map(|w| w.required_qty)
            .unwrap_or(Decimal::ZERO)
    }

    /// 期別採購日期
    pub fn weekly_po_date(&self, period: &Period) -> &str {
        self.week(period)
            .map(|w| w.po_date.as_str())
            .unwrap_or(NO_PO_DATE)
    }

    /// 所有期別的建議訂購量合計
    pub fn total_required_qty(&self) -> Decimal {
        self.weekly.iter().map(|w| w.required_qty).sum()
    }
}

/// MRP 計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrpPlan {
    /// 每個 BOM 子件一列（BOM 順序）
    pub rows: Vec<MrpRow>,

    /// 計劃視窗內的期別（表頭順序）
    pub selected_periods: Vec<Period>,

    /// 生產計劃表頭上的所有期別（供呼叫端放寬視窗）
    pub all_periods: Vec<Period>,
}

impl MrpPlan {
    /// 查詢物料結果列
    pub fn row(&self, material: &str) -> Option<&MrpRow> {
        self.rows.iter().find(|r| r.material == material)
    }

    /// 需要下單的物料列
    pub fn rows_with_orders(&self) -> impl Iterator<Item = &MrpRow> {
        self.rows
            .iter()
            .filter(|r| r.weekly.iter().any(WeeklyRequirement::needs_order))
    }
}
