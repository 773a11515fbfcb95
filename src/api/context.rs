// ==========================================
// 餐厅周订货系统 - 会话上下文
// ==========================================
// 职责: 持有调用方会话的可变状态 (销售批次 + 每日调整)
// 红线: 上下文归调用方所有, 显式传入每次计算; 引擎自身零状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::sales::SalesBatch;
use crate::engine::distribution::DayAdjustments;
use crate::domain::types::Weekday;
use std::collections::BTreeMap;

/// 滚动观察窗口上限 (周批次数)
pub const MAX_WEEKLY_BATCHES: usize = 4;

// ==========================================
// OrderContext - 订货会话上下文
// ==========================================

/// 调用方持有的会话状态
///
/// 整个核心中唯一的可变状态: 累积的周销售批次与每日调整百分比。
/// 派生数据 (食材用量/订单行) 均按需重算, 不在此缓存。
#[derive(Debug, Clone, Default)]
pub struct OrderContext {
    /// 来源标识 → 批次 (BTreeMap 保证确定性遍历顺序)
    batches: BTreeMap<String, SalesBatch>,

    /// 每日需求调整百分比 (闭店日在计算/呈现侧强制钉住)
    pub day_adjustments: DayAdjustments,
}

impl OrderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个周销售批次
    ///
    /// - 同一 `source_id` 重复添加视为重新加载, 替换旧批次
    /// - 超过 4 个不同来源时拒绝 (旧批次需手动移除, 不自动淘汰)
    pub fn add_batch(&mut self, batch: SalesBatch) -> ApiResult<()> {
        if !self.batches.contains_key(&batch.source_id) && self.batches.len() >= MAX_WEEKLY_BATCHES
        {
            return Err(ApiError::BatchLimitExceeded {
                limit: MAX_WEEKLY_BATCHES,
                existing: self
                    .batches
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        tracing::info!(
            "加载销售批次: {} ({} 条记录)",
            batch.source_id,
            batch.records.len()
        );
        self.batches.insert(batch.source_id.clone(), batch);
        Ok(())
    }

    /// 移除指定来源的批次
    ///
    /// # 返回
    /// 是否确有该批次
    pub fn remove_batch(&mut self, source_id: &str) -> bool {
        self.batches.remove(source_id).is_some()
    }

    /// 清空全部批次 (显式重置)
    pub fn clear_batches(&mut self) {
        self.batches.clear();
    }

    /// 当前批次数
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// 全部批次 (按来源标识序, 确定性)
    pub fn batches(&self) -> Vec<&SalesBatch> {
        self.batches.values().collect()
    }

    /// 批次快照 (计算输入用)
    pub fn batch_snapshot(&self) -> Vec<SalesBatch> {
        self.batches.values().cloned().collect()
    }

    /// 设置某日的需求调整百分比
    ///
    /// 任意有限实数都接受 (引擎不假设 UI 边界);
    /// 闭店日的存值无效——分布与投影侧会强制钉住。
    pub fn set_day_adjustment(&mut self, day: Weekday, pct: f64) -> ApiResult<()> {
        if !pct.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "调整百分比必须是有限数值: {day} = {pct}"
            )));
        }
        self.day_adjustments.set(day, pct);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(source: &str) -> SalesBatch {
        SalesBatch::new(source, Vec::new())
    }

    #[test]
    fn test_batch_limit_enforced() {
        let mut ctx = OrderContext::new();
        for i in 1..=4 {
            ctx.add_batch(batch(&format!("week{i}"))).unwrap();
        }
        assert_eq!(ctx.batch_count(), 4);

        let err = ctx.add_batch(batch("week5")).unwrap_err();
        assert!(matches!(err, ApiError::BatchLimitExceeded { limit: 4, .. }));

        // 手动移除后可继续加载
        assert!(ctx.remove_batch("week1"));
        ctx.add_batch(batch("week5")).unwrap();
        assert_eq!(ctx.batch_count(), 4);
    }

    #[test]
    fn test_same_source_replaces() {
        let mut ctx = OrderContext::new();
        for i in 1..=4 {
            ctx.add_batch(batch(&format!("week{i}"))).unwrap();
        }
        // 同名批次重新加载不触发上限
        ctx.add_batch(SalesBatch::new(
            "week4",
            vec![crate::domain::sales::ItemSalesRecord {
                item: "Burger".to_string(),
                qty_sold: Some(1.0),
                net_sales: 10.0,
                sales_category: None,
            }],
        ))
        .unwrap();
        assert_eq!(ctx.batch_count(), 4);
        assert_eq!(
            ctx.batches()
                .iter()
                .find(|b| b.source_id == "week4")
                .unwrap()
                .records
                .len(),
            1
        );
    }

    #[test]
    fn test_clear_is_explicit_reset() {
        let mut ctx = OrderContext::new();
        ctx.add_batch(batch("week1")).unwrap();
        ctx.clear_batches();
        assert_eq!(ctx.batch_count(), 0);
    }

    #[test]
    fn test_non_finite_adjustment_rejected() {
        let mut ctx = OrderContext::new();
        assert!(ctx.set_day_adjustment(Weekday::Friday, 25.0).is_ok());
        assert!(ctx.set_day_adjustment(Weekday::Friday, f64::NAN).is_err());
        assert!(ctx
            .set_day_adjustment(Weekday::Friday, f64::INFINITY)
            .is_err());
    }
}
