// ==========================================
// 餐厅周订货系统 - 销售数据实体
// ==========================================
// 职责: 周销售批次与单品销售记录
// 红线: 非数值销量视为"缺失", 不中断计算
// ==========================================

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// 单品销售记录 (ItemSalesRecord)
// ==========================================

/// 一条 POS 导出的单品周销售记录
///
/// `qty_sold` 为 None 表示源数据缺失或非数值, 聚合时跳过但不报错。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSalesRecord {
    /// 菜品名称 (保留原始大小写, 聚合按精确匹配分组)
    pub item: String,

    /// 销量 (缺失/非数值 → None)
    #[serde(default)]
    pub qty_sold: Option<f64>,

    /// 净销售额
    #[serde(default)]
    pub net_sales: f64,

    /// 销售类别 (如 "Food" / "Liquor", 用于未匹配项分类呈现)
    #[serde(default)]
    pub sales_category: Option<String>,
}

impl ItemSalesRecord {
    /// 有效销量: 缺失或非有限值按缺失处理
    pub fn effective_qty(&self) -> Option<f64> {
        match self.qty_sold {
            Some(q) if q.is_finite() => Some(q),
            _ => None,
        }
    }
}

// ==========================================
// 周销售批次 (SalesBatch)
// ==========================================

/// 一个上传周期的销售快照, 以来源标识 (通常是文件名) 为键
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesBatch {
    /// 来源标识, 如 "ProductMix_2026-01-19_2026-01-25.xlsx"
    pub source_id: String,

    /// 周起始日 (周一), 从来源标识解析; 解析失败为 None, 不影响计算
    #[serde(default)]
    pub week_start: Option<NaiveDate>,

    /// 本周全部单品记录
    pub records: Vec<ItemSalesRecord>,
}

impl SalesBatch {
    /// 从来源标识构建批次, 自动提取周起始日
    pub fn new(source_id: impl Into<String>, records: Vec<ItemSalesRecord>) -> Self {
        let source_id = source_id.into();
        let week_start = week_start_from_label(&source_id);
        Self {
            source_id,
            week_start,
            records,
        }
    }

    /// 本批次净销售额合计
    pub fn total_net_sales(&self) -> f64 {
        self.records.iter().map(|r| r.net_sales).sum()
    }
}

/// 从来源标识中提取周起始日
///
/// 识别形如 `ProductMix_2026-01-19_2026-01-25` 的日期片段, 取第一个可解析的
/// 日期并规整到所在周的周一。全部失败返回 None。
pub fn week_start_from_label(label: &str) -> Option<NaiveDate> {
    let stem = label
        .trim()
        .trim_end_matches(".xlsx")
        .trim_end_matches(".xls")
        .trim_end_matches(".json");

    for part in stem.split(&['_', ' '][..]) {
        if let Ok(date) = NaiveDate::parse_from_str(part, "%Y-%m-%d") {
            let offset = date.weekday().num_days_from_monday() as i64;
            return Some(date - Duration::days(offset));
        }
    }
    None
}
