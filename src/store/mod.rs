// ==========================================
// 餐厅周订货系统 - 参照数据层
// ==========================================
// 职责: 参照数据的加载、校验与只读持有
// 红线: 引擎只读参照数据; 热加载时在计算外整体替换快照
// ==========================================

pub mod error;
pub mod reference_store;

// 重导出核心类型
pub use error::{StoreError, StoreResult};
pub use reference_store::{
    recipes_from_json_str, vendor_directory_from_json_str, vendor_mapping_from_json_str,
    LoadReport, LoadWarning, ReferenceData, ReferenceStore,
};
