// ==========================================
// 餐厅周订货系统 - 销售聚合引擎
// ==========================================
// 职责: 合并多周销售批次, 产出单品周平均销量与周平均营收
// 红线: 平均分母是批次总数, 不是单品出现的周数
// ==========================================

use crate::domain::sales::SalesBatch;
use std::collections::BTreeMap;

// ==========================================
// 聚合输出
// ==========================================

/// 单品在观察窗口内的聚合结果
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAverage {
    /// 观察窗口内销量合计 (缺失/零销量记录不计入)
    pub total_qty: f64,

    /// 周平均销量 = total_qty / 批次总数
    pub weekly_avg_qty: f64,

    /// 净销售额合计
    pub total_net_sales: f64,

    /// 销售类别 (最后一次出现的非空值)
    pub sales_category: Option<String>,
}

/// 多周聚合结果
#[derive(Debug, Clone, Default)]
pub struct ItemAverages {
    /// 单品名 (精确大小写) → 聚合值, BTreeMap 保证确定性遍历
    pub items: BTreeMap<String, ItemAverage>,

    /// 参与聚合的批次数
    pub batch_count: usize,

    /// 周平均营收 (净销售额合计 / 批次数)
    pub avg_weekly_revenue: f64,
}

// ==========================================
// SalesAggregator - 销售聚合引擎
// ==========================================
pub struct SalesAggregator {
    // 无状态引擎
}

impl SalesAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 聚合多周销售批次
    ///
    /// 规则 (依据周订货口径):
    /// - 按单品名精确分组 (大小写敏感, 与 POS 导出保持一致)
    /// - 缺失/非数值/零销量的记录不计入合计, 但单品仍可经其他周出现
    /// - 周平均 = 合计 / 批次总数 (2 周有售、4 周观察 → 除以 4)
    /// - 不足 4 周不报错, 精度自然下降
    pub fn aggregate(&self, batches: &[SalesBatch]) -> ItemAverages {
        let batch_count = batches.len();
        if batch_count == 0 {
            return ItemAverages::default();
        }

        let mut items: BTreeMap<String, ItemAverage> = BTreeMap::new();
        let mut total_revenue = 0.0;

        for batch in batches {
            total_revenue += batch.total_net_sales();
            for record in &batch.records {
                let entry = items.entry(record.item.clone()).or_insert(ItemAverage {
                    total_qty: 0.0,
                    weekly_avg_qty: 0.0,
                    total_net_sales: 0.0,
                    sales_category: None,
                });

                if let Some(qty) = record.effective_qty() {
                    if qty != 0.0 {
                        entry.total_qty += qty;
                    }
                }
                entry.total_net_sales += record.net_sales;
                if record.sales_category.is_some() {
                    entry.sales_category = record.sales_category.clone();
                }
            }
        }

        let divisor = batch_count as f64;
        for item in items.values_mut() {
            item.weekly_avg_qty = item.total_qty / divisor;
        }

        tracing::debug!(
            "销售聚合完成: {} 批次, {} 单品, 周平均营收 {:.2}",
            batch_count,
            items.len(),
            total_revenue / divisor
        );

        ItemAverages {
            items,
            batch_count,
            avg_weekly_revenue: total_revenue / divisor,
        }
    }
}

impl Default for SalesAggregator {
    fn default() -> Self {
        Self::new()
    }
}
