// ==========================================
// 餐厅周订货系统 - 配置层
// ==========================================
// 职责: 可注入的计算配置 (星期权重档案)
// ==========================================

pub mod day_profile;

// 重导出核心配置类型
pub use day_profile::{DayOfWeekProfile, CLOSED_DAY_ADJUSTMENT_PCT};
