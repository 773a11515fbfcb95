// ==========================================
// 餐厅周订货系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、匹配规则
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod recipe;
pub mod sales;
pub mod types;
pub mod vendor;

// 重导出核心类型
pub use recipe::{Recipe, RecipeBook, RecipeIngredient};
pub use sales::{week_start_from_label, ItemSalesRecord, SalesBatch};
pub use types::{normalize_key, Weekday, DAY_ORDER, UNMAPPED_VENDOR};
pub use vendor::{OrderWindow, VendorDirectory, VendorMapping, VendorScheduleInfo};
