//! 供應商交期模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商資料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierEntry {
    /// 供應商名稱
    pub vendor_name: String,

    /// 供應商交期（天）
    pub vendor_lead_time_days: Decimal,

    /// 運輸天數
    pub transport_days: Decimal,

    /// 總交期 = 供應商交期 + 運輸天數
    pub total_lead_time: Decimal,
}

impl SupplierEntry {
    /// 創建新的供應商資料
    pub fn new(
        vendor_name: impl Into<String>,
        vendor_lead_time_days: Decimal,
        transport_days: Decimal,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            vendor_lead_time_days,
            transport_days,
            total_lead_time: vendor_lead_time_days + transport_days,
        }
    }

    /// 同一物料出現多次時是否應取代現有資料（取較短的總交期）
    pub fn is_shorter_than(&self, other: &SupplierEntry) -> bool {
        self.total_lead_time < other.total_lead_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_lead_time() {
        let supplier = SupplierEntry::new("ACME", Decimal::from(14), Decimal::from(3));
        assert_eq!(supplier.total_lead_time, Decimal::from(17));
    }

    #[test]
    fn test_shorter_lead_time() {
        let slow = SupplierEntry::new("SLOW", Decimal::from(20), Decimal::from(5));
        let fast = SupplierEntry::new("FAST", Decimal::from(10), Decimal::from(2));
        assert!(fast.is_shorter_than(&slow));
        assert!(!slow.is_shorter_than(&fast));
        assert!(!fast.is_shorter_than(&fast.clone()));
    }
}
