// ==========================================
// 餐厅周订货系统 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型, 转换参照数据层错误为用户可读消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::store::error::StoreError;
use thiserror::Error;

/// API 层错误类型
///
/// 仅请求结构问题与结构性坏数据走错误路径;
/// 销售数据质量缺口一律降级为计算告警, 不在此列。
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 销售批次已达上限 (滚动 4 周窗口), 需先手动移除旧批次
    #[error("销售批次已达上限 {limit}: 请先移除旧批次 (现有: {existing})")]
    BatchLimitExceeded { limit: usize, existing: String },

    #[error("供应商不存在: {0}")]
    UnknownVendor(String),

    #[error("订货窗口下标越界: vendor={vendor}, index={index}, 共 {window_count} 个窗口")]
    WindowOutOfRange {
        vendor: String,
        index: usize,
        window_count: usize,
    },

    // ==========================================
    // 参照数据错误
    // ==========================================
    #[error("参照数据错误: {0}")]
    Store(#[from] StoreError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
