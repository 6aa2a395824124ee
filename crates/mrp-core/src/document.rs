//! 文件類型與欄位角色

use serde::{Deserialize, Serialize};
use std::fmt;

/// 上傳文件類型（決定工作表評分與欄位規則）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    /// 物料清單
    Bom,
    /// 物料主檔
    MaterialMaster,
    /// 生產/需求計劃
    ProductionPlan,
    /// 供應商交期
    SupplierDetails,
    /// 週次對照日曆
    WeekPlan,
}

impl DocumentType {
    /// 所有文件類型
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Bom,
        DocumentType::MaterialMaster,
        DocumentType::ProductionPlan,
        DocumentType::SupplierDetails,
        DocumentType::WeekPlan,
    ];

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Bom => "BOM",
            DocumentType::MaterialMaster => "Material Master",
            DocumentType::ProductionPlan => "Production Plan",
            DocumentType::SupplierDetails => "Supplier Details",
            DocumentType::WeekPlan => "Week Plan",
        }
    }

    /// 穩定的鍵值（快取檔名等）
    pub fn key(self) -> &'static str {
        match self {
            DocumentType::Bom => "bom",
            DocumentType::MaterialMaster => "material_master",
            DocumentType::ProductionPlan => "production_plan",
            DocumentType::SupplierDetails => "supplier_details",
            DocumentType::WeekPlan => "week_plan",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 欄位角色（每個角色只屬於一種文件類型）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    // BOM
    ChildPart,
    DerivedMaterial,
    QuantityPerUnit,
    Uom,
    ChildDescription,

    // 物料主檔
    Material,
    Description,
    Mpq,
    Moq,
    ReorderPoint,
    OnHand,
    PendingPo,

    // 生產計劃
    PlanMaterial,

    // 供應商交期
    SupplierMaterial,
    VendorName,
    VendorLeadTime,
    TransportDays,

    // 週次日曆
    WeekNumber,
    StartDate,
}

impl ColumnRole {
    /// 所屬文件類型
    pub fn document_type(self) -> DocumentType {
        match self {
            ColumnRole::ChildPart
            | ColumnRole::DerivedMaterial
            | ColumnRole::QuantityPerUnit
            | ColumnRole::Uom
            | ColumnRole::ChildDescription => DocumentType::Bom,
            ColumnRole::Material
            | ColumnRole::Description
            | ColumnRole::Mpq
            | ColumnRole::Moq
            | ColumnRole::ReorderPoint
            | ColumnRole::OnHand
            | ColumnRole::PendingPo => DocumentType::MaterialMaster,
            ColumnRole::PlanMaterial => DocumentType::ProductionPlan,
            ColumnRole::SupplierMaterial
            | ColumnRole::VendorName
            | ColumnRole::VendorLeadTime
            | ColumnRole::TransportDays => DocumentType::SupplierDetails,
            ColumnRole::WeekNumber | ColumnRole::StartDate => DocumentType::WeekPlan,
        }
    }

    /// 文件類型的所有欄位角色
    pub fn for_document(document_type: DocumentType) -> &'static [ColumnRole] {
        match document_type {
            DocumentType::Bom => &[
                ColumnRole::ChildPart,
                ColumnRole::DerivedMaterial,
                ColumnRole::QuantityPerUnit,
                ColumnRole::Uom,
                ColumnRole::ChildDescription,
            ],
            DocumentType::MaterialMaster => &[
                ColumnRole::Material,
                ColumnRole::Description,
                ColumnRole::Mpq,
                ColumnRole::Moq,
                ColumnRole::ReorderPoint,
                ColumnRole::OnHand,
                ColumnRole::PendingPo,
            ],
            DocumentType::ProductionPlan => &[ColumnRole::PlanMaterial],
            DocumentType::SupplierDetails => &[
                ColumnRole::SupplierMaterial,
                ColumnRole::VendorName,
                ColumnRole::VendorLeadTime,
                ColumnRole::TransportDays,
            ],
            DocumentType::WeekPlan => &[ColumnRole::WeekNumber, ColumnRole::StartDate],
        }
    }

    /// 缺少時計算無法進行的角色
    pub fn is_required(self) -> bool {
        matches!(
            self,
            ColumnRole::ChildPart
                | ColumnRole::DerivedMaterial
                | ColumnRole::QuantityPerUnit
                | ColumnRole::Material
                | ColumnRole::PlanMaterial
                | ColumnRole::SupplierMaterial
        )
    }

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            ColumnRole::ChildPart => "child part",
            ColumnRole::DerivedMaterial => "derived material",
            ColumnRole::QuantityPerUnit => "quantity per unit",
            ColumnRole::Uom => "uom",
            ColumnRole::ChildDescription => "child description",
            ColumnRole::Material => "material",
            ColumnRole::Description => "description",
            ColumnRole::Mpq => "mpq",
            ColumnRole::Moq => "moq",
            ColumnRole::ReorderPoint => "reorder point",
            ColumnRole::OnHand => "on hand",
            ColumnRole::PendingPo => "pending po",
            ColumnRole::PlanMaterial => "plan material",
            ColumnRole::SupplierMaterial => "supplier material",
            ColumnRole::VendorName => "vendor name",
            ColumnRole::VendorLeadTime => "vendor lead time",
            ColumnRole::TransportDays => "transport days",
            ColumnRole::WeekNumber => "week number",
            ColumnRole::StartDate => "start date",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
