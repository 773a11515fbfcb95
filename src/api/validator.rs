// ==========================================
// 餐厅周订货系统 - 请求校验器
// ==========================================
// 职责: 订单计算请求的结构校验
// 红线: 只拦结构问题; 数据质量缺口交给计算告警, 不在此拦截
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::order_api::OrderRequest;
use std::collections::BTreeSet;

/// 校验订单计算请求
///
/// 规则:
/// - 供应商标识非空
/// - 覆盖日集合非空且不重复
/// - 损耗百分比有限且非负 (系数 ≥ 1.0)
/// - 单品调整系数有限且非负
pub fn validate_order_request(request: &OrderRequest) -> ApiResult<()> {
    if request.vendor.trim().is_empty() {
        return Err(ApiError::InvalidInput("供应商标识为空".to_string()));
    }

    if request.covers.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "订货窗口覆盖日为空: vendor={}",
            request.vendor
        )));
    }
    let unique: BTreeSet<_> = request.covers.iter().collect();
    if unique.len() != request.covers.len() {
        return Err(ApiError::InvalidInput(format!(
            "订货窗口覆盖日重复: vendor={}",
            request.vendor
        )));
    }

    if !request.waste_pct.is_finite() || request.waste_pct < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "损耗百分比必须是非负有限数值: {}",
            request.waste_pct
        )));
    }

    for (item, multiplier) in &request.item_adjustments {
        if !multiplier.is_finite() || *multiplier < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "单品调整系数必须是非负有限数值: {item} = {multiplier}"
            )));
        }
    }

    Ok(())
}
