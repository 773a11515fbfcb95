// ==========================================
// 餐厅周订货系统 - 供应商实体
// ==========================================
// 职责: 食材 → 供应商映射、供应商订货/送货日程
// 红线: 未映射食材归入 UNMAPPED 桶显性呈现, 绝不丢弃
// ==========================================

use crate::domain::types::{normalize_key, Weekday, UNMAPPED_VENDOR};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// 供应商映射 (VendorMapping)
// ==========================================

/// 食材名 → 供应商标识
///
/// 键按 normalize_key 规范化存储, 查找两侧统一规范化。
#[derive(Debug, Clone, Default)]
pub struct VendorMapping {
    mapping: BTreeMap<String, String>,
}

impl VendorMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从原始映射构建 (键规范化, 重复键后写覆盖)
    pub fn from_raw(raw: BTreeMap<String, String>) -> Self {
        let mut mapping = BTreeMap::new();
        for (ingredient, vendor) in raw {
            mapping.insert(normalize_key(&ingredient), vendor);
        }
        Self { mapping }
    }

    pub fn insert(&mut self, ingredient: &str, vendor: impl Into<String>) {
        self.mapping.insert(normalize_key(ingredient), vendor.into());
    }

    /// 查找食材的供应商, 未映射返回 UNMAPPED
    pub fn vendor_for(&self, ingredient: &str) -> &str {
        self.mapping
            .get(&normalize_key(ingredient))
            .map(String::as_str)
            .unwrap_or(UNMAPPED_VENDOR)
    }

    /// 是否存在映射 (不含 UNMAPPED 兜底)
    pub fn contains(&self, ingredient: &str) -> bool {
        self.mapping.contains_key(&normalize_key(ingredient))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// 映射中出现过的全部供应商 (含 UNMAPPED 显式条目, 去重有序)
    pub fn vendors(&self) -> BTreeSet<String> {
        self.mapping.values().cloned().collect()
    }
}

// ==========================================
// 订货窗口 (OrderWindow)
// ==========================================

/// 供应商的一个订货→送货窗口
///
/// `covers` 是本次送货所覆盖的营业日集合 (到下一个窗口为止)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWindow {
    /// 下单日
    pub order_day: Weekday,

    /// 送货日
    pub delivery_day: Weekday,

    /// 覆盖的营业日 (有序)
    pub covers: Vec<Weekday>,
}

impl OrderWindow {
    /// 人读标签, 如 "Order Sunday → Deliver Wednesday (covers Wed, Thu)"
    pub fn label(&self) -> String {
        let covers = self
            .covers
            .iter()
            .map(|d| d.short_name())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Order {} → Deliver {} (covers {})",
            self.order_day, self.delivery_day, covers
        )
    }
}

// ==========================================
// 供应商日程 (VendorScheduleInfo / VendorDirectory)
// ==========================================

/// 单个供应商的日程信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorScheduleInfo {
    /// 供应商全名 (如 "Gordon Food Service")
    pub full_name: String,

    /// 订货窗口列表 (可为空: 日程待配置)
    #[serde(default)]
    pub windows: Vec<OrderWindow>,

    /// 备注 (如 "schedule pending")
    #[serde(default)]
    pub note: Option<String>,
}

/// 全部供应商日程, 以供应商标识为键
#[derive(Debug, Clone, Default)]
pub struct VendorDirectory {
    vendors: BTreeMap<String, VendorScheduleInfo>,
}

impl VendorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: BTreeMap<String, VendorScheduleInfo>) -> Self {
        Self { vendors: raw }
    }

    pub fn insert(&mut self, vendor_id: impl Into<String>, info: VendorScheduleInfo) {
        self.vendors.insert(vendor_id.into(), info);
    }

    pub fn get(&self, vendor_id: &str) -> Option<&VendorScheduleInfo> {
        self.vendors.get(vendor_id)
    }

    /// 指定供应商的订货窗口 (无日程返回空切片)
    pub fn windows(&self, vendor_id: &str) -> &[OrderWindow] {
        self.vendors
            .get(vendor_id)
            .map(|v| v.windows.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VendorScheduleInfo)> {
        self.vendors.iter()
    }

    /// 检测同一供应商各窗口间的覆盖日重叠
    ///
    /// 正确配置下各窗口 covers 互不重叠; 引擎不据此拒绝计算,
    /// 由加载层转为告警呈现 (重叠会导致重复订货)。
    pub fn overlapping_covers(&self) -> Vec<(String, Weekday)> {
        let mut overlaps = Vec::new();
        for (vendor_id, info) in &self.vendors {
            let mut seen: BTreeSet<Weekday> = BTreeSet::new();
            for window in &info.windows {
                for day in &window.covers {
                    if !seen.insert(*day) {
                        overlaps.push((vendor_id.clone(), *day));
                    }
                }
            }
        }
        overlaps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_lookup_normalized() {
        let mut mapping = VendorMapping::new();
        mapping.insert("Bun", "GFS");

        assert_eq!(mapping.vendor_for("bun"), "GFS");
        assert_eq!(mapping.vendor_for("  BUN "), "GFS");
        assert_eq!(mapping.vendor_for("Patty"), UNMAPPED_VENDOR);
    }

    #[test]
    fn test_overlapping_covers_detected() {
        let mut dir = VendorDirectory::new();
        dir.insert(
            "GFS",
            VendorScheduleInfo {
                full_name: "Gordon Food Service".to_string(),
                windows: vec![
                    OrderWindow {
                        order_day: Weekday::Sunday,
                        delivery_day: Weekday::Wednesday,
                        covers: vec![Weekday::Wednesday, Weekday::Thursday],
                    },
                    OrderWindow {
                        order_day: Weekday::Wednesday,
                        delivery_day: Weekday::Friday,
                        covers: vec![Weekday::Thursday, Weekday::Friday],
                    },
                ],
                note: None,
            },
        );

        let overlaps = dir.overlapping_covers();
        assert_eq!(overlaps, vec![("GFS".to_string(), Weekday::Thursday)]);
    }

    #[test]
    fn test_windows_for_unknown_vendor_is_empty() {
        let dir = VendorDirectory::new();
        assert!(dir.windows("EVANS").is_empty());
    }
}
