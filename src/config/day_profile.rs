// ==========================================
// 餐厅周订货系统 - 星期权重配置
// ==========================================
// 职责: 营业日/闭店日划分与各营业日需求权重
// 红线: 权重是可注入配置, 不是算法里的硬编码字面量
// ==========================================

use crate::domain::types::{Weekday, DAY_ORDER};
use crate::store::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 营业日权重之和允许的浮点容差
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 闭店日固定调整百分比 (-100%, 不可上调)
pub const CLOSED_DAY_ADJUSTMENT_PCT: f64 = -100.0;

// ==========================================
// 星期权重档案 (DayOfWeekProfile)
// ==========================================

/// 一周需求在各日的静态分布
///
/// 闭店日权重为 0; 营业日权重在 [0,1] 且合计 1.0。
/// 进程级配置, 与销售数据无关; 不同餐厅注入各自档案。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOfWeekProfile {
    /// 每日权重 (周一..周日), 闭店日为 0
    weights: [f64; 7],

    /// 闭店标记 (周一..周日)
    closed: [bool; 7],
}

impl DayOfWeekProfile {
    /// 构建并校验档案
    ///
    /// # 参数
    /// - `weights`: 日名 → 权重, 缺失的日按 0 处理
    /// - `closed_days`: 闭店日集合
    ///
    /// # 校验
    /// - 闭店日权重必须为 0
    /// - 权重必须有限且非负
    /// - 营业日权重合计 1.0 (±1e-6)
    pub fn new(
        weights: BTreeMap<Weekday, f64>,
        closed_days: &[Weekday],
    ) -> Result<Self, StoreError> {
        let mut w = [0.0f64; 7];
        let mut c = [false; 7];

        for day in closed_days {
            c[day.index()] = true;
        }

        for (day, weight) in &weights {
            if !weight.is_finite() || *weight < 0.0 || *weight > 1.0 {
                return Err(StoreError::InvalidDayWeight {
                    day: day.name().to_string(),
                    weight: *weight,
                });
            }
            if c[day.index()] && *weight != 0.0 {
                return Err(StoreError::ClosedDayWithWeight {
                    day: day.name().to_string(),
                    weight: *weight,
                });
            }
            w[day.index()] = *weight;
        }

        let open_sum: f64 = DAY_ORDER
            .iter()
            .filter(|d| !c[d.index()])
            .map(|d| w[d.index()])
            .sum();
        if (open_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(StoreError::WeightSumMismatch { sum: open_sum });
        }

        Ok(Self {
            weights: w,
            closed: c,
        })
    }

    /// 从 JSON 构建
    ///
    /// 格式: `{"closed_days": ["Monday","Tuesday"], "weights": {"Wednesday": 0.18, ...}}`
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        #[derive(Deserialize)]
        struct RawProfile {
            #[serde(default)]
            closed_days: Vec<String>,
            weights: BTreeMap<String, f64>,
        }

        let raw: RawProfile =
            serde_json::from_str(json).map_err(|e| StoreError::JsonParseError {
                file: "day profile".to_string(),
                message: e.to_string(),
            })?;

        let mut closed = Vec::with_capacity(raw.closed_days.len());
        for name in &raw.closed_days {
            closed.push(parse_day(name)?);
        }

        let mut weights = BTreeMap::new();
        for (name, weight) in raw.weights {
            weights.insert(parse_day(&name)?, weight);
        }

        Self::new(weights, &closed)
    }

    /// 某日是否闭店
    pub fn is_closed(&self, day: Weekday) -> bool {
        self.closed[day.index()]
    }

    /// 某日的需求权重 (闭店日为 0)
    pub fn weight(&self, day: Weekday) -> f64 {
        self.weights[day.index()]
    }

    /// 营业日列表 (按周序)
    pub fn open_days(&self) -> Vec<Weekday> {
        DAY_ORDER
            .iter()
            .copied()
            .filter(|d| !self.is_closed(*d))
            .collect()
    }
}

impl Default for DayOfWeekProfile {
    /// High Dive 档案: 周一/周二闭店, 周三至周日营业, 周六最忙
    fn default() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(Weekday::Wednesday, 0.18);
        weights.insert(Weekday::Thursday, 0.20);
        weights.insert(Weekday::Friday, 0.24);
        weights.insert(Weekday::Saturday, 0.26);
        weights.insert(Weekday::Sunday, 0.12);

        // 默认档案常量必然通过校验
        Self::new(weights, &[Weekday::Monday, Weekday::Tuesday])
            .expect("default day-of-week profile must be valid")
    }
}

fn parse_day(name: &str) -> Result<Weekday, StoreError> {
    Weekday::parse(name).ok_or_else(|| StoreError::InvalidDayName {
        day: name.to_string(),
    })
}
