// ==========================================
// 餐厅周订货系统 - 食材用量解算引擎
// ==========================================
// 职责: 配方展开 (单品销量 → 食材周用量) 并标注供应商
// 红线: 未匹配单品不是错误 (酒水类无配方属正常), 记录并贡献零用量
// 红线: 累加满足结合律/交换律, 处理顺序不影响结果
// ==========================================

use crate::domain::recipe::RecipeBook;
use crate::domain::types::normalize_key;
use crate::domain::vendor::VendorMapping;
use crate::engine::aggregator::ItemAverages;
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// 解算输出
// ==========================================

/// 单种食材的周用量 (派生瞬态数据, 每次计算从头重算)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientUsage {
    /// 食材名 (配方中的原始大小写)
    pub ingredient: String,

    /// 周用量 (非负)
    pub weekly_qty_used: f64,

    /// 计量单位 (取自配方, 跨配方冲突时后写覆盖)
    pub unit: String,

    /// 供应商标识 (无映射时为 UNMAPPED)
    pub vendor: String,
}

/// 未匹配到配方的销售单品
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedItem {
    pub item: String,
    pub sales_category: Option<String>,
}

/// 一次配方展开的完整结果
#[derive(Debug, Clone, Default)]
pub struct UsageResolution {
    /// 规范化食材键 → 用量行
    pub usage: BTreeMap<String, IngredientUsage>,

    /// 匹配到配方的单品名
    pub matched_items: Vec<String>,

    /// 未匹配的单品 (含销售类别, 供"食品类缺配方"呈现)
    pub unmatched_items: Vec<UnmatchedItem>,
}

impl UsageResolution {
    /// 合并另一份解算结果 (同食材用量相加, 单位/供应商后写覆盖)
    ///
    /// 用量累加对输入划分满足结合律: 任意拆分批次分别解算再合并,
    /// 与一次性解算等价 (浮点舍入误差内)。
    pub fn merge(mut self, other: UsageResolution) -> UsageResolution {
        for (key, row) in other.usage {
            self.usage
                .entry(key)
                .and_modify(|existing| {
                    existing.weekly_qty_used += row.weekly_qty_used;
                    existing.unit = row.unit.clone();
                    existing.vendor = row.vendor.clone();
                })
                .or_insert(row);
        }
        self.matched_items.extend(other.matched_items);
        self.unmatched_items.extend(other.unmatched_items);
        self
    }

    /// 按供应商汇总食材数
    pub fn count_by_vendor(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in self.usage.values() {
            *counts.entry(row.vendor.clone()).or_insert(0usize) += 1;
        }
        counts
    }
}

// ==========================================
// IngredientUsageResolver - 用量解算引擎
// ==========================================
pub struct IngredientUsageResolver {
    // 无状态引擎
}

impl IngredientUsageResolver {
    pub fn new() -> Self {
        Self {}
    }

    /// 配方展开
    ///
    /// # 参数
    /// - `averages`: 聚合后的单品周平均销量
    /// - `recipes`: 配方表 (大小写不敏感匹配)
    /// - `vendor_mapping`: 食材 → 供应商映射
    /// - `item_adjustments`: 单品调整系数 (键任意大小写, 缺省 1.0;
    ///   用于已知一次性活动等临时覆盖)
    ///
    /// 对每个匹配单品的每种配方食材:
    /// `ingredient_qty += recipe_qty_per_unit × weekly_avg × multiplier`
    pub fn resolve(
        &self,
        averages: &ItemAverages,
        recipes: &RecipeBook,
        vendor_mapping: &VendorMapping,
        item_adjustments: &BTreeMap<String, f64>,
    ) -> UsageResolution {
        // 调整系数键统一规范化
        let adjustments: BTreeMap<String, f64> = item_adjustments
            .iter()
            .map(|(k, v)| (normalize_key(k), *v))
            .collect();

        let mut resolution = UsageResolution::default();

        for (item_name, item_avg) in &averages.items {
            if item_avg.weekly_avg_qty == 0.0 {
                // 零需求单品跳过展开, 但不算未匹配
                if recipes.lookup(item_name).is_none() {
                    resolution.unmatched_items.push(UnmatchedItem {
                        item: item_name.clone(),
                        sales_category: item_avg.sales_category.clone(),
                    });
                }
                continue;
            }

            let recipe = match recipes.lookup(item_name) {
                Some(r) => r,
                None => {
                    resolution.unmatched_items.push(UnmatchedItem {
                        item: item_name.clone(),
                        sales_category: item_avg.sales_category.clone(),
                    });
                    continue;
                }
            };

            resolution.matched_items.push(item_name.clone());

            let multiplier = adjustments
                .get(&normalize_key(item_name))
                .copied()
                .unwrap_or(1.0);
            let adjusted_qty = item_avg.weekly_avg_qty * multiplier;

            for (ing_name, ing) in &recipe.ingredients {
                let contribution = ing.qty * adjusted_qty;
                let vendor = vendor_mapping.vendor_for(ing_name).to_string();

                resolution
                    .usage
                    .entry(normalize_key(ing_name))
                    .and_modify(|row| {
                        row.weekly_qty_used += contribution;
                        row.unit = ing.unit.clone();
                        row.vendor = vendor.clone();
                    })
                    .or_insert(IngredientUsage {
                        ingredient: ing_name.clone(),
                        weekly_qty_used: contribution,
                        unit: ing.unit.clone(),
                        vendor,
                    });
            }
        }

        tracing::debug!(
            "配方展开完成: {} 匹配, {} 未匹配, {} 食材",
            resolution.matched_items.len(),
            resolution.unmatched_items.len(),
            resolution.usage.len()
        );

        resolution
    }
}

impl Default for IngredientUsageResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregator::ItemAverage;
    use std::collections::BTreeMap;

    fn averages(entries: &[(&str, f64)]) -> ItemAverages {
        let mut items = BTreeMap::new();
        for (name, avg) in entries {
            items.insert(
                name.to_string(),
                ItemAverage {
                    total_qty: avg * 4.0,
                    weekly_avg_qty: *avg,
                    total_net_sales: 0.0,
                    sales_category: None,
                },
            );
        }
        ItemAverages {
            items,
            batch_count: 4,
            avg_weekly_revenue: 0.0,
        }
    }

    fn burger_book() -> RecipeBook {
        let mut book = RecipeBook::new();
        let mut ingredients = BTreeMap::new();
        ingredients.insert(
            "Bun".to_string(),
            crate::domain::recipe::RecipeIngredient {
                qty: 1.0,
                unit: "each".to_string(),
            },
        );
        ingredients.insert(
            "Patty".to_string(),
            crate::domain::recipe::RecipeIngredient {
                qty: 2.0,
                unit: "each".to_string(),
            },
        );
        book.insert("Burger", ingredients).unwrap();
        book
    }

    fn gfs_mapping() -> VendorMapping {
        let mut mapping = VendorMapping::new();
        mapping.insert("bun", "GFS");
        mapping.insert("patty", "GFS");
        mapping
    }

    #[test]
    fn test_recipe_explosion_basic() {
        let resolver = IngredientUsageResolver::new();
        let result = resolver.resolve(
            &averages(&[("BURGER", 10.0)]),
            &burger_book(),
            &gfs_mapping(),
            &BTreeMap::new(),
        );

        assert_eq!(result.matched_items, vec!["BURGER"]);
        assert_eq!(result.usage["bun"].weekly_qty_used, 10.0);
        assert_eq!(result.usage["patty"].weekly_qty_used, 20.0);
        assert_eq!(result.usage["bun"].vendor, "GFS");
    }

    #[test]
    fn test_adjustment_multiplier_applied() {
        let mut adjustments = BTreeMap::new();
        adjustments.insert("Burger".to_string(), 1.5);

        let result = IngredientUsageResolver::new().resolve(
            &averages(&[("burger", 10.0)]),
            &burger_book(),
            &gfs_mapping(),
            &adjustments,
        );
        assert_eq!(result.usage["bun"].weekly_qty_used, 15.0);
    }

    #[test]
    fn test_unmatched_item_recorded_not_errored() {
        let result = IngredientUsageResolver::new().resolve(
            &averages(&[("House Margarita", 25.0)]),
            &burger_book(),
            &gfs_mapping(),
            &BTreeMap::new(),
        );
        assert!(result.usage.is_empty());
        assert_eq!(result.unmatched_items.len(), 1);
        assert_eq!(result.unmatched_items[0].item, "House Margarita");
    }

    #[test]
    fn test_unmapped_ingredient_kept_under_unmapped() {
        let mut mapping = VendorMapping::new();
        mapping.insert("bun", "GFS");
        // patty 无映射

        let result = IngredientUsageResolver::new().resolve(
            &averages(&[("Burger", 10.0)]),
            &burger_book(),
            &mapping,
            &BTreeMap::new(),
        );
        assert_eq!(result.usage["patty"].vendor, "UNMAPPED");
        assert_eq!(result.usage["patty"].weekly_qty_used, 20.0);
    }

    #[test]
    fn test_merge_associativity() {
        let resolver = IngredientUsageResolver::new();
        let book = burger_book();
        let mapping = gfs_mapping();
        let none = BTreeMap::new();

        let combined = resolver.resolve(
            &averages(&[("Burger", 10.0), ("BURGER", 5.0)]),
            &book,
            &mapping,
            &none,
        );
        let split = resolver
            .resolve(&averages(&[("Burger", 10.0)]), &book, &mapping, &none)
            .merge(resolver.resolve(&averages(&[("BURGER", 5.0)]), &book, &mapping, &none));

        for key in ["bun", "patty"] {
            let a = combined.usage[key].weekly_qty_used;
            let b = split.usage[key].weekly_qty_used;
            assert!((a - b).abs() < 1e-9, "{key}: {a} != {b}");
        }
    }
}
