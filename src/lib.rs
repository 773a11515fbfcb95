// ==========================================
// 餐厅周订货系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 订货量计算引擎 (人工最终控制权)
// 数据链路: 参照数据 → 销售聚合 → 配方展开 → 星期分布 → 订单构建
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 参照数据层 - 只读映射表加载
pub mod store;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 星期权重档案
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    normalize_key, ItemSalesRecord, OrderWindow, RecipeBook, SalesBatch, VendorDirectory,
    VendorMapping, Weekday, DAY_ORDER, UNMAPPED_VENDOR,
};

// 配置
pub use config::DayOfWeekProfile;

// 参照数据
pub use store::{LoadReport, LoadWarning, ReferenceData, ReferenceStore, StoreError};

// 引擎
pub use engine::{
    DayAdjustments, DayDemandDistributor, IngredientUsageResolver, OrderCalculator, OrderOutcome,
    SalesAggregator, VendorOrder, VendorOrderBuilder, WeekProjector,
};

// API
pub use api::{ApiError, ApiResult, OrderApi, OrderContext, OrderRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "餐厅周订货系统";

// ==========================================
// 预编译检查
// ==========================================
