//! # MRP Calculation Engine
//!
//! 核心 MRP 計算引擎：需求展開、淨需求、批量規則、交期推算

pub mod bucketing;
pub mod calculator;
pub mod explode;
pub mod lead_time;
pub mod lot_sizing;
pub mod netting;

// Re-export 主要類型
pub use calculator::{compute_mrp, MrpCalculator, MrpInputs};
pub use explode::DemandExploder;
pub use lead_time::LeadTimeCalculator;
pub use lot_sizing::LotSizingCalculator;
pub use netting::{NetRequirement, NettingCalculator};

use serde::Serialize;

/// MRP 計算結果
#[derive(Debug, Clone, Serialize)]
pub struct MrpResult {
    /// 計劃結果
    pub plan: mrp_core::MrpPlan,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl MrpResult {
    /// 創建計算結果
    pub fn new(plan: mrp_core::MrpPlan) -> Self {
        Self {
            plan,
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }

    /// 指定嚴重度的警告
    pub fn warnings_of(&self, severity: WarningSeverity) -> impl Iterator<Item = &MrpWarning> {
        self.warnings.iter().filter(move |w| w.severity == severity)
    }
}

/// MRP 警告（資料不完整但仍可計算）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrpWarning {
    pub material: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(material: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            material,
            message,
            severity,
        }
    }

    pub fn info(material: String, message: String) -> Self {
        Self::new(material, message, WarningSeverity::Info)
    }

    pub fn warning(material: String, message: String) -> Self {
        Self::new(material, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
