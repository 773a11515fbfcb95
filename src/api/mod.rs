// ==========================================
// 餐厅周订货系统 - API 层
// ==========================================
// 职责: 面向调用方的业务接口与请求校验
// ==========================================

pub mod context;
pub mod error;
pub mod order_api;
pub mod validator;

// 重导出核心类型
pub use context::{OrderContext, MAX_WEEKLY_BATCHES};
pub use error::{ApiError, ApiResult};
pub use order_api::{OrderApi, OrderRequest};
pub use validator::validate_order_request;
