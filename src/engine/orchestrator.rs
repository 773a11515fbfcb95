// ==========================================
// 餐厅周订货系统 - 计算编排器
// ==========================================
// 职责: 串联 聚合 → 配方展开 → 星期分布 → 订单构建 的完整链路
// 红线: 编排器不持状态; 相同输入必得字节一致的有序输出
// 红线: 数据质量缺口降级为告警呈现, 不中断计算
// ==========================================

use crate::config::day_profile::DayOfWeekProfile;
use crate::domain::types::{Weekday, UNMAPPED_VENDOR};
use crate::engine::aggregator::SalesAggregator;
use crate::engine::distribution::{DayAdjustments, DayDemandDistributor, DayVector};
use crate::engine::order_builder::{OrderOutcome, VendorOrderBuilder};
use crate::engine::usage::{IngredientUsage, IngredientUsageResolver};
use crate::domain::sales::SalesBatch;
use std::collections::BTreeMap;

// ==========================================
// 计算告警 (CalcWarning)
// ==========================================

/// 计算期发现的数据缺口 (上抛呈现, 不终止计算)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcWarning {
    /// 没有任何销售批次, 结果为空
    NoSalesBatches,

    /// 配方表为空, 无法展开任何单品
    NoRecipes,

    /// 目标供应商没有配置订货日程
    NoScheduleForVendor { vendor: String },

    /// 存在归入 UNMAPPED 桶的食材
    UnmappedIngredients { count: usize },
}

impl std::fmt::Display for CalcWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcWarning::NoSalesBatches => write!(f, "未加载任何销售批次"),
            CalcWarning::NoRecipes => write!(f, "配方表为空"),
            CalcWarning::NoScheduleForVendor { vendor } => {
                write!(f, "供应商 {vendor} 未配置订货日程")
            }
            CalcWarning::UnmappedIngredients { count } => {
                write!(f, "{count} 种食材无供应商映射 (见 UNMAPPED 桶)")
            }
        }
    }
}

// ==========================================
// 计算结果 (OrderCalculation)
// ==========================================

/// 一次供应商订单计算的完整输出
#[derive(Debug, Clone)]
pub struct OrderCalculation {
    /// 订单结果信号 (无映射食材 / 订单)
    pub outcome: OrderOutcome,

    /// 未匹配配方的食品类单品 (应当补配方, 去重有序)
    pub unmatched_food_items: Vec<String>,

    /// 未匹配配方的非食品类单品 (酒水等, 属预期, 去重有序)
    pub unmatched_other_items: Vec<String>,

    /// 计算告警
    pub warnings: Vec<CalcWarning>,
}

// ==========================================
// OrderCalculator - 计算编排器
// ==========================================

/// 订单计算编排器
///
/// 所有输入显式传入 (参照数据 / 销售批次 / 调整), 引擎自身无状态,
/// 不同供应商的计算相互独立, 可并行调用。
pub struct OrderCalculator {
    aggregator: SalesAggregator,
    resolver: IngredientUsageResolver,
    distributor: DayDemandDistributor,
    builder: VendorOrderBuilder,
}

impl OrderCalculator {
    pub fn new() -> Self {
        Self {
            aggregator: SalesAggregator::new(),
            resolver: IngredientUsageResolver::new(),
            distributor: DayDemandDistributor::new(),
            builder: VendorOrderBuilder::new(),
        }
    }

    /// 计算一个供应商订货窗口的订单
    ///
    /// # 参数
    /// - `batches`: 销售批次 (≤4 周, 由调用方会话持有)
    /// - `recipes`/`vendor_mapping`: 只读参照数据
    /// - `profile`: 星期权重档案
    /// - `day_adjustments`: 每日需求调整百分比
    /// - `item_adjustments`: 单品调整系数
    /// - `vendor`: 目标供应商
    /// - `covers`: 选定订货窗口覆盖的日集合
    /// - `waste_factor`: 损耗缓冲系数 (≥1.0)
    /// - `vendor_has_schedule`: 目标供应商是否配置了日程 (缺失转告警)
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        &self,
        batches: &[SalesBatch],
        recipes: &crate::domain::recipe::RecipeBook,
        vendor_mapping: &crate::domain::vendor::VendorMapping,
        profile: &DayOfWeekProfile,
        day_adjustments: &DayAdjustments,
        item_adjustments: &BTreeMap<String, f64>,
        vendor: &str,
        covers: &[Weekday],
        waste_factor: f64,
        vendor_has_schedule: bool,
    ) -> OrderCalculation {
        let mut warnings = Vec::new();
        if batches.is_empty() {
            warnings.push(CalcWarning::NoSalesBatches);
        }
        if recipes.is_empty() {
            warnings.push(CalcWarning::NoRecipes);
        }
        if !vendor_has_schedule {
            warnings.push(CalcWarning::NoScheduleForVendor {
                vendor: vendor.to_string(),
            });
        }

        // 1. 聚合: 多周批次 → 单品周平均
        let averages = self.aggregator.aggregate(batches);

        // 2. 配方展开: 单品周平均 → 食材周用量 (含供应商标注)
        let resolution =
            self.resolver
                .resolve(&averages, recipes, vendor_mapping, item_adjustments);

        let unmapped_count = resolution
            .usage
            .values()
            .filter(|row| row.vendor == UNMAPPED_VENDOR)
            .count();
        if unmapped_count > 0 {
            warnings.push(CalcWarning::UnmappedIngredients {
                count: unmapped_count,
            });
        }

        // 3. 星期分布: 每种食材摊成 7 日向量
        let distributed: Vec<(IngredientUsage, DayVector)> = resolution
            .usage
            .values()
            .map(|row| {
                let vector =
                    self.distributor
                        .distribute(row.weekly_qty_used, profile, day_adjustments);
                (row.clone(), vector)
            })
            .collect();

        // 4. 订单构建: 覆盖日汇总 + 损耗缓冲 + 排序
        let outcome = self.builder.build(vendor, covers, &distributed, waste_factor);

        // 未匹配单品按销售类别分流 (非食品类缺配方属预期)
        let mut food: BTreeMap<String, ()> = BTreeMap::new();
        let mut other: BTreeMap<String, ()> = BTreeMap::new();
        for unmatched in &resolution.unmatched_items {
            let is_food = unmatched
                .sales_category
                .as_deref()
                .map(|c| c.contains("Food"))
                .unwrap_or(false);
            if is_food {
                food.insert(unmatched.item.clone(), ());
            } else {
                other.insert(unmatched.item.clone(), ());
            }
        }

        for warning in &warnings {
            tracing::warn!("订单计算告警: {warning}");
        }

        OrderCalculation {
            outcome,
            unmatched_food_items: food.into_keys().collect(),
            unmatched_other_items: other.into_keys().collect(),
            warnings,
        }
    }
}

impl Default for OrderCalculator {
    fn default() -> Self {
        Self::new()
    }
}
