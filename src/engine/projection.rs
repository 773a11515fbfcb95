// ==========================================
// 餐厅周订货系统 - 星期营收投影
// ==========================================
// 职责: 生成 {日 → 基准/调整后/调整%} 展示表
// 红线: 闭店日基准与调整后恒为 0, 呈现的调整值钉在 -100%
// ==========================================

use crate::config::day_profile::{DayOfWeekProfile, CLOSED_DAY_ADJUSTMENT_PCT};
use crate::domain::types::{Weekday, DAY_ORDER};
use crate::engine::distribution::DayAdjustments;
use serde::Serialize;

// ==========================================
// 投影行 (DayProjection)
// ==========================================

/// 单日营收投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayProjection {
    pub day: Weekday,

    /// 基准投影 = 周平均营收 × 当日权重
    pub base: f64,

    /// 调整后投影 = base × (1 + adjustment_pct/100), 负值截断为 0
    pub adjusted: f64,

    /// 呈现的调整百分比 (闭店日钉在 -100)
    pub adjustment_pct: f64,
}

/// 一周营收投影表
#[derive(Debug, Clone, Serialize)]
pub struct WeekProjection {
    /// 七行, 按周一..周日
    pub days: Vec<DayProjection>,

    /// 基准合计
    pub base_total: f64,

    /// 调整后合计
    pub adjusted_total: f64,
}

// ==========================================
// WeekProjector - 投影引擎
// ==========================================
pub struct WeekProjector {
    // 无状态引擎
}

impl WeekProjector {
    pub fn new() -> Self {
        Self {}
    }

    /// 从周平均营收生成一周投影表
    ///
    /// 注: 这是对周汇总数据按静态权重的"估算拆分",
    /// 不是真实的按日销售测量 (上游导出只有周合计)。
    pub fn project(
        &self,
        avg_weekly_revenue: f64,
        profile: &DayOfWeekProfile,
        adjustments: &DayAdjustments,
    ) -> WeekProjection {
        let mut days = Vec::with_capacity(7);
        let mut base_total = 0.0;
        let mut adjusted_total = 0.0;

        for day in DAY_ORDER {
            let row = if profile.is_closed(day) {
                DayProjection {
                    day,
                    base: 0.0,
                    adjusted: 0.0,
                    adjustment_pct: CLOSED_DAY_ADJUSTMENT_PCT,
                }
            } else {
                let pct = adjustments.get(day);
                let base = avg_weekly_revenue * profile.weight(day);
                let adjusted = (base * (1.0 + pct / 100.0)).max(0.0);
                DayProjection {
                    day,
                    base,
                    adjusted,
                    adjustment_pct: pct,
                }
            };

            base_total += row.base;
            adjusted_total += row.adjusted;
            days.push(row);
        }

        WeekProjection {
            days,
            base_total,
            adjusted_total,
        }
    }
}

impl Default for WeekProjector {
    fn default() -> Self {
        Self::new()
    }
}
