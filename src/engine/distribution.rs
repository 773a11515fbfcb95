// ==========================================
// 餐厅周订货系统 - 星期需求分布引擎
// ==========================================
// 职责: 把食材周用量按星期权重摊到 7 天
// 红线: 闭店日恒为 0, 任何调整值都不能把闭店日抬起来
// 红线: 纯函数, 相同输入必得相同输出
// ==========================================

use crate::config::day_profile::DayOfWeekProfile;
use crate::domain::types::{Weekday, DAY_ORDER};

// ==========================================
// 七日需求向量 (DayVector)
// ==========================================

/// 按 DAY_ORDER (周一..周日) 索引的每日需求量
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayVector(pub [f64; 7]);

impl DayVector {
    pub fn get(&self, day: Weekday) -> f64 {
        self.0[day.index()]
    }

    /// 指定日集合上的需求合计
    pub fn sum_over(&self, days: &[Weekday]) -> f64 {
        days.iter().map(|d| self.get(*d)).sum()
    }

    /// 全周合计
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

// ==========================================
// 每日调整百分比 (DayAdjustments)
// ==========================================

/// 用户设置的每日需求调整 (活动/天气), 单位: 百分比
///
/// UI 层限制在 -50%..+100%, 引擎本身不假设边界:
/// 任意实数值都被接受, 负需求在分布时截断为 0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayAdjustments(pub [f64; 7]);

impl DayAdjustments {
    /// 全零调整
    pub fn none() -> Self {
        Self([0.0; 7])
    }

    pub fn get(&self, day: Weekday) -> f64 {
        self.0[day.index()]
    }

    pub fn set(&mut self, day: Weekday, pct: f64) {
        self.0[day.index()] = pct;
    }
}

impl Default for DayAdjustments {
    fn default() -> Self {
        Self::none()
    }
}

// ==========================================
// DayDemandDistributor - 星期需求分布引擎
// ==========================================
pub struct DayDemandDistributor {
    // 无状态引擎
}

impl DayDemandDistributor {
    pub fn new() -> Self {
        Self {}
    }

    /// 把一个周用量摊到 7 天
    ///
    /// 每日量:
    /// - 闭店日: 恒为 0 (调整值被无视, 闭店不可上调)
    /// - 营业日: `weekly × weight × (1 + pct/100)`, 非有限值按 0 兜底,
    ///   负结果截断为 0 (负食材需求无意义)
    pub fn distribute(
        &self,
        weekly_qty_used: f64,
        profile: &DayOfWeekProfile,
        adjustments: &DayAdjustments,
    ) -> DayVector {
        let mut daily = [0.0f64; 7];

        for day in DAY_ORDER {
            if profile.is_closed(day) {
                continue;
            }
            let factor = 1.0 + adjustments.get(day) / 100.0;
            let qty = weekly_qty_used * profile.weight(day) * factor;
            daily[day.index()] = if qty.is_finite() && qty > 0.0 { qty } else { 0.0 };
        }

        DayVector(daily)
    }
}

impl Default for DayDemandDistributor {
    fn default() -> Self {
        Self::new()
    }
}
