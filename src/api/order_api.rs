// ==========================================
// 餐厅周订货系统 - 订货 API
// ==========================================
// 职责: 面向调用方的无状态门面 (订单计算 / 营收投影 / 日程查询)
// 红线: 参照数据与会话上下文显式传入, API 自身不持状态
// ==========================================

use crate::api::context::OrderContext;
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_order_request;
use crate::config::day_profile::DayOfWeekProfile;
use crate::domain::types::Weekday;
use crate::domain::vendor::OrderWindow;
use crate::engine::aggregator::SalesAggregator;
use crate::engine::orchestrator::{OrderCalculation, OrderCalculator};
use crate::engine::projection::{WeekProjection, WeekProjector};
use crate::store::reference_store::ReferenceData;
use std::collections::BTreeMap;

// ==========================================
// 订单计算请求 (OrderRequest)
// ==========================================

/// 一次供应商订单计算的全部请求参数
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// 目标供应商标识 (如 "GFS")
    pub vendor: String,

    /// 选定订货窗口的覆盖日集合
    pub covers: Vec<Weekday>,

    /// 损耗缓冲百分比 (10 → 系数 1.10)
    pub waste_pct: f64,

    /// 单品调整系数 (活动/一次性特供, 缺省 1.0)
    pub item_adjustments: BTreeMap<String, f64>,
}

impl OrderRequest {
    /// 从供应商日程中的窗口构造请求
    pub fn for_window(vendor: &str, window: &OrderWindow, waste_pct: f64) -> Self {
        Self {
            vendor: vendor.to_string(),
            covers: window.covers.clone(),
            waste_pct,
            item_adjustments: BTreeMap::new(),
        }
    }

    /// 损耗系数 = 1 + pct/100
    pub fn waste_factor(&self) -> f64 {
        1.0 + self.waste_pct / 100.0
    }
}

// ==========================================
// OrderApi - 订货 API 门面
// ==========================================
pub struct OrderApi {
    calculator: OrderCalculator,
    projector: WeekProjector,
    aggregator: SalesAggregator,
}

impl OrderApi {
    pub fn new() -> Self {
        Self {
            calculator: OrderCalculator::new(),
            projector: WeekProjector::new(),
            aggregator: SalesAggregator::new(),
        }
    }

    /// 计算一个供应商订货窗口的订单
    ///
    /// 校验请求结构后走完整计算链路; 数据质量缺口 (未匹配/未映射/缺日程)
    /// 体现在结果的告警与分类列表中, 不会让调用失败。
    pub fn calculate_order(
        &self,
        reference: &ReferenceData,
        profile: &DayOfWeekProfile,
        context: &OrderContext,
        request: &OrderRequest,
    ) -> ApiResult<OrderCalculation> {
        validate_order_request(request)?;

        tracing::info!(
            "计算订单: vendor={}, covers={:?}, waste={}%",
            request.vendor,
            request.covers.iter().map(|d| d.short_name()).collect::<Vec<_>>(),
            request.waste_pct
        );

        let batches = context.batch_snapshot();
        let vendor_has_schedule = !reference.vendor_directory.windows(&request.vendor).is_empty();

        Ok(self.calculator.calculate(
            &batches,
            &reference.recipes,
            &reference.vendor_mapping,
            profile,
            &context.day_adjustments,
            &request.item_adjustments,
            &request.vendor,
            &request.covers,
            request.waste_factor(),
            vendor_has_schedule,
        ))
    }

    /// 按窗口下标计算订单 (调用方从日程选单里选窗口)
    pub fn calculate_order_for_window(
        &self,
        reference: &ReferenceData,
        profile: &DayOfWeekProfile,
        context: &OrderContext,
        vendor: &str,
        window_index: usize,
        waste_pct: f64,
        item_adjustments: BTreeMap<String, f64>,
    ) -> ApiResult<OrderCalculation> {
        let windows = self.order_windows(reference, vendor)?;
        let window = windows
            .get(window_index)
            .ok_or_else(|| ApiError::WindowOutOfRange {
                vendor: vendor.to_string(),
                index: window_index,
                window_count: windows.len(),
            })?;

        let mut request = OrderRequest::for_window(vendor, window, waste_pct);
        request.item_adjustments = item_adjustments;
        self.calculate_order(reference, profile, context, &request)
    }

    /// 一周营收投影表 (展示用)
    pub fn project_week(
        &self,
        reference_revenue_basis: &OrderContext,
        profile: &DayOfWeekProfile,
    ) -> WeekProjection {
        let batches = reference_revenue_basis.batch_snapshot();
        let averages = self.aggregator.aggregate(&batches);
        self.projector.project(
            averages.avg_weekly_revenue,
            profile,
            &reference_revenue_basis.day_adjustments,
        )
    }

    /// 查询供应商的订货窗口列表
    ///
    /// # 返回
    /// - `Err(UnknownVendor)`: 日程表中不存在该供应商
    /// - `Ok(&[])`: 供应商存在但日程待配置
    pub fn order_windows<'a>(
        &self,
        reference: &'a ReferenceData,
        vendor: &str,
    ) -> ApiResult<&'a [OrderWindow]> {
        match reference.vendor_directory.get(vendor) {
            Some(info) => Ok(&info.windows),
            None => Err(ApiError::UnknownVendor(vendor.to_string())),
        }
    }

    /// 有可用订货窗口的供应商列表 (选单用, 有序)
    pub fn vendors_with_windows(&self, reference: &ReferenceData) -> Vec<String> {
        reference
            .vendor_directory
            .iter()
            .filter(|(_, info)| !info.windows.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }
}

impl Default for OrderApi {
    fn default() -> Self {
        Self::new()
    }
}
