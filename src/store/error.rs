// ==========================================
// 餐厅周订货系统 - 参照数据层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 职责: 区分"结构性坏数据"(快速失败)与"数据质量缺口"(降级告警)
// ==========================================

use thiserror::Error;

/// 参照数据层错误类型
///
/// 仅结构性坏数据走错误路径; 销售数据噪声 (未匹配项/未映射食材)
/// 不是错误, 由 LoadReport / 计算告警呈现。
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 文件相关错误 =====
    #[error("文件读取失败: {file}: {message}")]
    FileReadError { file: String, message: String },

    #[error("JSON 解析失败: {file}: {message}")]
    JsonParseError { file: String, message: String },

    // ===== 结构性坏数据 (快速失败) =====
    #[error("配方数量非法: recipe={recipe}, ingredient={ingredient}, qty={qty} (必须为正数)")]
    InvalidIngredientQty {
        recipe: String,
        ingredient: String,
        qty: f64,
    },

    #[error("非法日名: {day}")]
    InvalidDayName { day: String },

    #[error("星期权重非法: day={day}, weight={weight} (必须在 [0,1] 内)")]
    InvalidDayWeight { day: String, weight: f64 },

    #[error("闭店日带非零权重: day={day}, weight={weight}")]
    ClosedDayWithWeight { day: String, weight: f64 },

    #[error("营业日权重合计 {sum} ≠ 1.0")]
    WeightSumMismatch { sum: f64 },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::FileReadError {
            file: String::new(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
