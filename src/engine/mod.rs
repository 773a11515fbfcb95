// ==========================================
// 餐厅周订货系统 - 引擎层
// ==========================================
// 职责: 实现订货计算的业务规则
// 红线: 引擎全部无状态, 输入显式传入, 同输入同输出
// ==========================================

pub mod aggregator;
pub mod distribution;
pub mod order_builder;
pub mod orchestrator;
pub mod projection;
pub mod usage;

// 重导出核心引擎
pub use aggregator::{ItemAverage, ItemAverages, SalesAggregator};
pub use distribution::{DayAdjustments, DayDemandDistributor, DayVector};
pub use order_builder::{OrderLine, OrderOutcome, VendorOrder, VendorOrderBuilder};
pub use orchestrator::{CalcWarning, OrderCalculation, OrderCalculator};
pub use projection::{DayProjection, WeekProjection, WeekProjector};
pub use usage::{IngredientUsage, IngredientUsageResolver, UnmatchedItem, UsageResolution};
