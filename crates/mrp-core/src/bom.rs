//! 物料清單（父件 → 子件用量）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// BOM 關係
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEdge {
    /// 父件
    pub parent_material: String,
    /// 子件
    pub child_material: String,
    /// 每單位父件的子件用量（> 0）
    pub quantity_per_parent_unit: Decimal,
}

impl BomEdge {
    /// 創建 BOM 關係
    pub fn new(
        parent_material: impl Into<String>,
        child_material: impl Into<String>,
        quantity_per_parent_unit: Decimal,
    ) -> Self {
        Self {
            parent_material: parent_material.into(),
            child_material: child_material.into(),
            quantity_per_parent_unit,
        }
    }

    /// 空白料號或非正用量的關係不參與展開
    pub fn is_valid(&self) -> bool {
        !self.parent_material.is_empty()
            && !self.child_material.is_empty()
            && self.quantity_per_parent_unit > Decimal::ZERO
    }
}

/// 子件屬性（取自 BOM 文件）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildAttributes {
    pub uom: String,
    pub description: String,
}

/// BOM 查詢表
#[derive(Debug, Clone, Default)]
pub struct BomLookup {
    /// 父件 → 子件關係
    by_parent: HashMap<String, Vec<BomEdge>>,

    /// 所有子件（依首次出現順序，不論用量是否有效）
    children: Vec<String>,

    /// 子件屬性（首次出現的非空值）
    attributes: HashMap<String, ChildAttributes>,

    seen: HashSet<String>,
}

impl BomLookup {
    /// 創建空查詢表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登記子件（維持首次出現順序）
    pub fn register_child(&mut self, child_material: &str, uom: &str, description: &str) {
        if child_material.is_empty() {
            return;
        }

        if self.seen.insert(child_material.to_string()) {
            self.children.push(child_material.to_string());
        }

        let attributes = self
            .attributes
            .entry(child_material.to_string())
            .or_default();
        if attributes.uom.is_empty() {
            attributes.uom = uom.to_string();
        }
        if attributes.description.is_empty() {
            attributes.description = description.to_string();
        }
    }

    /// 加入 BOM 關係（無效關係直接忽略）
    pub fn add_edge(&mut self, edge: BomEdge) -> bool {
        if !edge.is_valid() {
            return false;
        }
        self.by_parent
            .entry(edge.parent_material.clone())
            .or_default()
            .push(edge);
        true
    }

    /// 父件的所有子件關係
    pub fn edges_for(&self, parent_material: &str) -> &[BomEdge] {
        self.by_parent
            .get(parent_material)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 所有子件（BOM 順序）
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// 子件屬性
    pub fn attributes(&self, child_material: &str) -> Option<&ChildAttributes> {
        self.attributes.get(child_material)
    }

    /// 父件數量
    pub fn parent_count(&self) -> usize {
        self.by_parent.len()
    }

    /// 有效關係數量
    pub fn edge_count(&self) -> usize {
        self.by_parent.values().map(Vec::len).sum()
    }
}
