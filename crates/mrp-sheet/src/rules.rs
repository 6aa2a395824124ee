//! 工作表評分與欄位比對規則表
//!
//! 所有比對都針對 [`normalize`](crate::normalize::normalize) 之後的文字。

use mrp_core::{ColumnRole, DocumentType};

use crate::normalize::compact;

/// 關鍵字比對對象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 工作表名稱
    SheetName,
    /// 掃描範圍內任一儲存格
    AnyCell,
}

/// 評分規則：任一關鍵字命中即加權一次
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub target: Target,
    pub keywords: &'static [&'static str],
    pub weight: i32,
}

impl KeywordRule {
    const fn new(target: Target, keywords: &'static [&'static str], weight: i32) -> Self {
        Self {
            target,
            keywords,
            weight,
        }
    }

    /// 是否命中（忽略大小寫、空白與底線）
    pub fn hits(&self, text: &str) -> bool {
        let text = compact(text);
        self.keywords
            .iter()
            .any(|keyword| text.contains(&compact(keyword)))
    }
}

use Target::{AnyCell, SheetName};

const BOM_RULES: &[KeywordRule] = &[
    KeywordRule::new(SheetName, &["bom"], 5),
    KeywordRule::new(AnyCell, &["child"], 3),
    KeywordRule::new(AnyCell, &["derived"], 2),
    KeywordRule::new(AnyCell, &["quantity", "per kit"], 1),
    KeywordRule::new(AnyCell, &["uom"], 1),
];

const MATERIAL_MASTER_RULES: &[KeywordRule] = &[
    KeywordRule::new(SheetName, &["master"], 5),
    KeywordRule::new(SheetName, &["material"], 2),
    KeywordRule::new(AnyCell, &["mpq"], 3),
    KeywordRule::new(AnyCell, &["moq"], 3),
    KeywordRule::new(AnyCell, &["on hand", "stock"], 2),
    KeywordRule::new(AnyCell, &["reorder"], 1),
    KeywordRule::new(AnyCell, &["pending po", "open po"], 1),
];

const PRODUCTION_PLAN_RULES: &[KeywordRule] = &[
    KeywordRule::new(SheetName, &["plan", "demand"], 5),
    KeywordRule::new(SheetName, &["production", "inventory"], 2),
    KeywordRule::new(AnyCell, &["derived"], 1),
    KeywordRule::new(AnyCell, &["material"], 1),
];

const SUPPLIER_RULES: &[KeywordRule] = &[
    KeywordRule::new(SheetName, &["supplier", "vendor"], 5),
    KeywordRule::new(AnyCell, &["lead time"], 3),
    KeywordRule::new(AnyCell, &["vendor", "supplier"], 2),
    KeywordRule::new(AnyCell, &["transport", "transit"], 2),
    KeywordRule::new(AnyCell, &["material"], 1),
];

const WEEK_PLAN_RULES: &[KeywordRule] = &[
    KeywordRule::new(SheetName, &["week"], 5),
    KeywordRule::new(SheetName, &["calendar"], 2),
    KeywordRule::new(AnyCell, &["week"], 2),
    KeywordRule::new(AnyCell, &["start"], 2),
    KeywordRule::new(AnyCell, &["end"], 1),
];

/// 文件類型的評分規則
pub fn keyword_rules(document_type: DocumentType) -> &'static [KeywordRule] {
    match document_type {
        DocumentType::Bom => BOM_RULES,
        DocumentType::MaterialMaster => MATERIAL_MASTER_RULES,
        DocumentType::ProductionPlan => PRODUCTION_PLAN_RULES,
        DocumentType::SupplierDetails => SUPPLIER_RULES,
        DocumentType::WeekPlan => WEEK_PLAN_RULES,
    }
}

/// 任一儲存格符合期別格式時的加分（期別欄位的特徵）
pub fn period_bonus(document_type: DocumentType) -> i32 {
    match document_type {
        DocumentType::ProductionPlan => 4,
        _ => 0,
    }
}

/// 表頭列條件（同一列須全部成立）
#[derive(Debug, Clone, Copy)]
pub enum RowPredicate {
    /// 任一儲存格包含任一關鍵字
    AnyContains(&'static [&'static str]),
    /// 任一儲存格符合期別格式
    AnyPeriod,
}

/// 文件類型的表頭列條件
pub fn header_predicates(document_type: DocumentType) -> &'static [RowPredicate] {
    use RowPredicate::{AnyContains, AnyPeriod};

    match document_type {
        DocumentType::Bom => &[AnyContains(&["child"]), AnyContains(&["derived"])],
        DocumentType::MaterialMaster => &[
            AnyContains(&["material", "part"]),
            AnyContains(&["mpq", "moq"]),
        ],
        DocumentType::ProductionPlan => &[AnyContains(&["material", "derived"]), AnyPeriod],
        DocumentType::SupplierDetails => &[
            AnyContains(&["material", "part"]),
            AnyContains(&["lead"]),
        ],
        DocumentType::WeekPlan => &[AnyContains(&["week", "wk"]), AnyContains(&["start", "date"])],
    }
}

/// 欄位比對器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// 完全相等
    Exact(&'static str),
    /// 包含
    Contains(&'static str),
    /// 包含第一個字串但不包含第二個
    ContainsNot(&'static str, &'static str),
}

impl Matcher {
    /// 比對正規化後的表頭文字
    pub fn matches(&self, header: &str) -> bool {
        if header.is_empty() {
            return false;
        }
        match self {
            Matcher::Exact(expected) => header == *expected,
            Matcher::Contains(needle) => header.contains(needle),
            Matcher::ContainsNot(needle, excluded) => {
                header.contains(needle) && !header.contains(excluded)
            }
        }
    }
}

/// 欄位角色的比對器（依優先序；完全相等優先於包含）
pub fn column_matchers(role: ColumnRole) -> &'static [Matcher] {
    use Matcher::{Contains, ContainsNot, Exact};

    match role {
        ColumnRole::ChildPart => &[
            Exact("child part"),
            ContainsNot("child", "desc"),
            Contains("childpart"),
            Contains("component"),
            Contains("comp part"),
        ],
        ColumnRole::DerivedMaterial => &[
            Exact("derived material"),
            Contains("derived"),
            Exact("parent"),
            Contains("parent material"),
            ContainsNot("parent", "desc"),
            Contains("assembly"),
        ],
        ColumnRole::QuantityPerUnit => &[
            Exact("quantity per kit"),
            Contains("per kit"),
            Contains("qty per"),
            Contains("quantity per"),
            Contains("usage"),
            Contains("quantity"),
            Contains("qty"),
        ],
        ColumnRole::Uom => &[
            Exact("uom"),
            Contains("uom"),
            Contains("unit of measure"),
            Exact("unit"),
        ],
        ColumnRole::ChildDescription => &[
            Contains("child desc"),
            Contains("component desc"),
            Contains("description"),
        ],
        ColumnRole::Material => &[
            Exact("material"),
            Exact("material code"),
            Exact("material no"),
            Exact("part number"),
            ContainsNot("material", "desc"),
            Contains("part no"),
            Contains("item code"),
        ],
        ColumnRole::Description => &[
            Exact("description"),
            Contains("material desc"),
            Contains("description"),
            Contains("desc"),
        ],
        ColumnRole::Mpq => &[
            Exact("mpq"),
            Contains("mpq"),
            Contains("min pack"),
            Contains("pack qty"),
            Contains("packing"),
        ],
        ColumnRole::Moq => &[
            Exact("moq"),
            Contains("moq"),
            Contains("min order"),
            Contains("minimum order"),
        ],
        ColumnRole::ReorderPoint => &[
            Exact("reorder point"),
            Contains("reorder"),
            Exact("rop"),
            Contains("re order"),
        ],
        ColumnRole::OnHand => &[
            Exact("on hand"),
            Contains("on hand"),
            Contains("onhand"),
            ContainsNot("stock", "safety"),
            Contains("inventory"),
            Contains("unrestricted"),
        ],
        ColumnRole::PendingPo => &[
            Exact("pending po"),
            Contains("pending po"),
            Contains("open po"),
            Contains("in transit"),
            Contains("transit"),
            Contains("pending"),
        ],
        ColumnRole::PlanMaterial => &[
            Exact("derived material"),
            Contains("derived"),
            Exact("material"),
            ContainsNot("material", "desc"),
            Contains("part"),
            Contains("item"),
            Contains("fg"),
        ],
        ColumnRole::SupplierMaterial => &[
            Exact("material"),
            Exact("material code"),
            ContainsNot("material", "desc"),
            Contains("part"),
            Contains("item"),
        ],
        ColumnRole::VendorName => &[
            Exact("vendor name"),
            Exact("supplier name"),
            Exact("vendor"),
            Exact("supplier"),
            ContainsNot("vendor", "lead"),
            ContainsNot("supplier", "lead"),
        ],
        ColumnRole::VendorLeadTime => &[
            Exact("vendor lead time"),
            Contains("vendor lead"),
            Contains("supplier lead"),
            Contains("lead time"),
            Contains("leadtime"),
            Contains("lead"),
        ],
        ColumnRole::TransportDays => &[
            Contains("transport"),
            Contains("transit"),
            Contains("shipping"),
            Contains("logistic"),
            Contains("freight"),
        ],
        ColumnRole::WeekNumber => &[
            Exact("week"),
            Exact("week no"),
            Exact("week number"),
            Contains("week no"),
            Contains("week number"),
            Exact("wk"),
            ContainsNot("week", "date"),
        ],
        ColumnRole::StartDate => &[
            Exact("start date"),
            Contains("start date"),
            Contains("week start"),
            Contains("start"),
            Contains("from"),
            ContainsNot("date", "end"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rule_ignores_spacing() {
        let rule = KeywordRule::new(AnyCell, &["per kit"], 1);
        assert!(rule.hits("Qty_Per_Kit"));
        assert!(rule.hits("QTY PERKIT"));
        assert!(!rule.hits("Quantity"));
    }

    #[test]
    fn test_matchers() {
        assert!(Matcher::Exact("uom").matches("uom"));
        assert!(!Matcher::Exact("uom").matches("uom code"));
        assert!(Matcher::Contains("child").matches("child material"));
        assert!(!Matcher::ContainsNot("child", "desc").matches("child description"));
        assert!(!Matcher::Contains("child").matches(""));
    }

    #[test]
    fn test_every_role_has_matchers() {
        for document_type in DocumentType::ALL {
            for role in ColumnRole::for_document(document_type) {
                assert!(!column_matchers(*role).is_empty(), "{role} has no matchers");
            }
            assert!(!keyword_rules(document_type).is_empty());
            assert!(!header_predicates(document_type).is_empty());
        }
    }
}
