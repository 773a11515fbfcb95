// ==========================================
// 餐厅周订货系统 - 供应商订单构建引擎
// ==========================================
// 职责: 对选定供应商与订货窗口, 汇总覆盖日需求并套损耗缓冲
// 红线: "该供应商无映射食材"与"全部零需求"是两个不同信号, 不可混淆
// 红线: 输出排序确定 (订货量降序, 同量按食材名升序)
// ==========================================

use crate::domain::types::Weekday;
use crate::engine::distribution::DayVector;
use crate::engine::usage::IngredientUsage;
use serde::Serialize;
use std::cmp::Ordering;

/// 显示舍入: 保留两位小数
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ==========================================
// 订单行 (OrderLine)
// ==========================================

/// 订货表中的一行 (派生瞬态数据)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    /// 食材名
    pub ingredient: String,

    /// 7 日需求明细 (周一..周日, 审计用, 两位小数)
    pub daily_qty: [f64; 7],

    /// 订货量 = 损耗系数 × Σ覆盖日需求 (两位小数)
    pub order_qty: f64,

    /// 计量单位
    pub unit: String,
}

// ==========================================
// 订单与结果信号
// ==========================================

/// 一个供应商订货窗口的完整订单
#[derive(Debug, Clone, Serialize)]
pub struct VendorOrder {
    /// 供应商标识
    pub vendor: String,

    /// 本单覆盖的营业日
    pub covers: Vec<Weekday>,

    /// 订货行 (已按订货量降序; 全部零需求时为空)
    pub lines: Vec<OrderLine>,

    /// 订货食材数
    pub ingredient_count: usize,

    /// 订货量合计 (跨单位直接相加, 仅作速览)
    pub total_units: f64,
}

/// 订单构建结果
///
/// `NoMappedIngredients` 表示映射配置缺口 (一个食材都没有归到该供应商);
/// `Order` 的行列表为空则是"本窗口全部零需求"的正常小单场景。
#[derive(Debug, Clone, Serialize)]
pub enum OrderOutcome {
    NoMappedIngredients,
    Order(VendorOrder),
}

// ==========================================
// VendorOrderBuilder - 订单构建引擎
// ==========================================
pub struct VendorOrderBuilder {
    // 无状态引擎
}

impl VendorOrderBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建供应商订单
    ///
    /// # 参数
    /// - `vendor`: 目标供应商标识 (UNMAPPED 桶同样可出单供核查)
    /// - `covers`: 选定订货窗口覆盖的日集合
    /// - `distributed`: 全部食材的 (用量行, 7 日分布) 对
    /// - `waste_factor`: 损耗缓冲系数 (≥ 1.0)
    ///
    /// 每个归属该供应商的食材: `order_qty = waste_factor × Σ覆盖日需求`,
    /// 非正订货量的行剔除 (零需求不是可订行)。
    pub fn build(
        &self,
        vendor: &str,
        covers: &[Weekday],
        distributed: &[(IngredientUsage, DayVector)],
        waste_factor: f64,
    ) -> OrderOutcome {
        let mut mapped_any = false;
        let mut lines: Vec<OrderLine> = Vec::new();

        for (usage, vector) in distributed {
            if usage.vendor != vendor {
                continue;
            }
            mapped_any = true;

            let order_qty = round2(waste_factor * vector.sum_over(covers));
            if order_qty <= 0.0 {
                continue;
            }

            let mut daily = [0.0f64; 7];
            for (i, v) in vector.0.iter().enumerate() {
                daily[i] = round2(*v);
            }

            lines.push(OrderLine {
                ingredient: usage.ingredient.clone(),
                daily_qty: daily,
                order_qty,
                unit: usage.unit.clone(),
            });
        }

        if !mapped_any {
            tracing::warn!("供应商 {vendor} 无任何映射食材 (检查供应商映射配置)");
            return OrderOutcome::NoMappedIngredients;
        }

        // 订货量降序, 同量按食材名升序保证确定性
        lines.sort_by(|a, b| match b.order_qty.total_cmp(&a.order_qty) {
            Ordering::Equal => a.ingredient.cmp(&b.ingredient),
            other => other,
        });

        let total_units = round2(lines.iter().map(|l| l.order_qty).sum());
        let ingredient_count = lines.len();

        OrderOutcome::Order(VendorOrder {
            vendor: vendor.to_string(),
            covers: covers.to_vec(),
            lines,
            ingredient_count,
            total_units,
        })
    }
}

impl Default for VendorOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
