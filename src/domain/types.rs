// ==========================================
// 餐厅周订货系统 - 领域类型定义
// ==========================================
// 职责: 星期类型、键规范化、哨兵常量
// 红线: 所有名称匹配统一走 normalize_key, 禁止各处自造匹配规则
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 未映射供应商哨兵 (UNMAPPED)
// ==========================================
// 无供应商映射的食材归入该桶, 只做显性呈现, 不丢弃
pub const UNMAPPED_VENDOR: &str = "UNMAPPED";

// ==========================================
// 星期 (Weekday)
// ==========================================
// 顺序: Monday..Sunday, 与订货表展示顺序一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// 一周七天, 固定展示顺序
pub const DAY_ORDER: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// 全名 (与参照数据 JSON 中的日名一致)
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// 三字母缩写 (订货表列头)
    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    /// 在 DAY_ORDER 中的下标 (周一=0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 从日名解析 (大小写不敏感, 接受全名或三字母缩写)
    ///
    /// # 返回
    /// - `Some(Weekday)`: 解析成功
    /// - `None`: 非法日名 (参照数据加载时按结构错误处理)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Some(Weekday::Monday),
            "tuesday" | "tue" => Some(Weekday::Tuesday),
            "wednesday" | "wed" => Some(Weekday::Wednesday),
            "thursday" | "thu" => Some(Weekday::Thursday),
            "friday" | "fri" => Some(Weekday::Friday),
            "saturday" | "sat" => Some(Weekday::Saturday),
            "sunday" | "sun" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ==========================================
// 键规范化 (normalize_key)
// ==========================================

/// 规范化匹配键: 去首尾空白 + 小写
///
/// 统一应用于查找的两侧: 菜品名 → 配方键、食材名 → 供应商映射键、
/// 菜品名 → 单品调整系数键。替代来源系统"先小写再精确大小写"的两段回退。
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_roundtrip() {
        for day in DAY_ORDER {
            assert_eq!(Weekday::parse(day.name()), Some(day));
            assert_eq!(Weekday::parse(day.short_name()), Some(day));
            assert_eq!(Weekday::parse(&day.name().to_uppercase()), Some(day));
        }
        assert_eq!(Weekday::parse("Moonday"), None);
    }

    #[test]
    fn test_weekday_index_order() {
        assert_eq!(Weekday::Monday.index(), 0);
        assert_eq!(Weekday::Sunday.index(), 6);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Smash Burger "), "smash burger");
        assert_eq!(normalize_key("BUN"), "bun");
    }
}
