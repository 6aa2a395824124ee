//! 物料主檔（庫存與批量參數）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LotSizingPolicy;

/// 物料主檔資料（以去空白、保留大小寫的料號為鍵）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialMasterEntry {
    /// 最小包裝量（訂購量須為其倍數）
    pub mpq: Decimal,

    /// 最小訂購量
    pub moq: Decimal,

    /// 再訂購點（任何非零調整需求都會加上此緩衝量）
    pub reorder_point: Decimal,

    /// 現有庫存
    pub on_hand: Decimal,

    /// 已下單未到貨數量
    pub pending_po: Decimal,

    /// 物料描述
    pub description: String,
}

impl MaterialMasterEntry {
    /// 創建新的物料主檔資料
    pub fn new(on_hand: Decimal, pending_po: Decimal) -> Self {
        Self {
            on_hand,
            pending_po,
            ..Self::default()
        }
    }

    /// 建構器模式：設置最小包裝量
    pub fn with_mpq(mut self, mpq: Decimal) -> Self {
        self.mpq = mpq;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_moq(mut self, moq: Decimal) -> Self {
        self.moq = moq;
        self
    }

    /// 建構器模式：設置再訂購點
    pub fn with_reorder_point(mut self, reorder_point: Decimal) -> Self {
        self.reorder_point = reorder_point;
        self
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 可抵用數量（現有 + 在途）
    pub fn excess_qty(&self) -> Decimal {
        self.on_hand + self.pending_po
    }

    /// 批量政策
    pub fn lot_sizing_policy(&self) -> LotSizingPolicy {
        LotSizingPolicy::new(self.mpq, self.moq, self.reorder_point)
    }
}
