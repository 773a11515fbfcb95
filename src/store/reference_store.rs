// ==========================================
// 餐厅周订货系统 - 参照数据存储
// ==========================================
// 职责: 加载并校验三张静态映射表 (配方/供应商映射/供应商日程)
// 生命周期: 会话开始加载一次, 计算期间只读不可变
// 红线: 缺文件降级为空表并显性上报, 结构性坏数据快速失败
// ==========================================

use crate::domain::recipe::{RecipeBook, RecipeIngredient};
use crate::domain::types::Weekday;
use crate::domain::vendor::{OrderWindow, VendorDirectory, VendorMapping, VendorScheduleInfo};
use crate::store::error::{StoreError, StoreResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// ==========================================
// 加载告警 (LoadWarning)
// ==========================================

/// 加载期发现的数据配置缺口 (非致命, 呈现给操作员)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// 参照文件缺失, 对应映射按空表处理
    MissingFile { which: String },

    /// 同一供应商多个窗口覆盖同一天 (会导致重复订货)
    OverlappingCovers { vendor: String, day: Weekday },

    /// 配方食材没有供应商映射 (将归入 UNMAPPED 桶)
    UnmappedRecipeIngredient { ingredient: String },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::MissingFile { which } => {
                write!(f, "参照文件缺失: {which} (按空表处理)")
            }
            LoadWarning::OverlappingCovers { vendor, day } => {
                write!(f, "供应商 {vendor} 多个订货窗口覆盖 {day}")
            }
            LoadWarning::UnmappedRecipeIngredient { ingredient } => {
                write!(f, "食材无供应商映射: {ingredient}")
            }
        }
    }
}

// ==========================================
// 加载报告 (LoadReport)
// ==========================================

/// 一次参照数据加载的结果摘要
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub recipe_count: usize,
    pub mapping_count: usize,
    pub vendor_count: usize,
    pub warnings: Vec<LoadWarning>,
}

// ==========================================
// 参照数据 (ReferenceData)
// ==========================================

/// 会话级只读参照数据
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub recipes: RecipeBook,
    pub vendor_mapping: VendorMapping,
    pub vendor_directory: VendorDirectory,
}

impl ReferenceData {
    pub fn new(
        recipes: RecipeBook,
        vendor_mapping: VendorMapping,
        vendor_directory: VendorDirectory,
    ) -> Self {
        Self {
            recipes,
            vendor_mapping,
            vendor_directory,
        }
    }

    /// 生成加载报告 (计数 + 一致性告警)
    pub fn build_report(&self, mut warnings: Vec<LoadWarning>) -> LoadReport {
        for (vendor, day) in self.vendor_directory.overlapping_covers() {
            warnings.push(LoadWarning::OverlappingCovers { vendor, day });
        }
        for ingredient in self.recipes.all_ingredient_names() {
            if !self.vendor_mapping.contains(&ingredient) {
                warnings.push(LoadWarning::UnmappedRecipeIngredient { ingredient });
            }
        }

        for warning in &warnings {
            tracing::warn!("参照数据告警: {warning}");
        }

        LoadReport {
            recipe_count: self.recipes.len(),
            mapping_count: self.vendor_mapping.len(),
            vendor_count: self.vendor_directory.len(),
            warnings,
        }
    }
}

// ==========================================
// 原始 JSON 形状 (与来源导出文件一致)
// ==========================================

/// vendor_schedules.json 中单个供应商的原始条目
#[derive(Debug, Deserialize)]
struct RawVendorEntry {
    full_name: String,
    #[serde(default)]
    orders: Vec<RawOrderWindow>,
    #[serde(default)]
    note: Option<String>,
    // color 字段仅供前端使用, 加载时忽略
}

#[derive(Debug, Deserialize)]
struct RawOrderWindow {
    order_day: String,
    delivery_day: String,
    covers: Vec<String>,
}

// ==========================================
// 加载函数
// ==========================================

/// 从 JSON 字符串解析配方表
///
/// 格式: `{"BURGER": {"Bun": {"qty": 1, "unit": "each"}, ...}, ...}`
pub fn recipes_from_json_str(json: &str) -> StoreResult<RecipeBook> {
    let raw: BTreeMap<String, BTreeMap<String, RecipeIngredient>> = serde_json::from_str(json)
        .map_err(|e| StoreError::JsonParseError {
            file: "recipes".to_string(),
            message: e.to_string(),
        })?;
    RecipeBook::from_raw(raw)
}

/// 从 JSON 字符串解析供应商映射
///
/// 格式: `{"bun": "GFS", "patty": "GFS", ...}`
pub fn vendor_mapping_from_json_str(json: &str) -> StoreResult<VendorMapping> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(json).map_err(|e| StoreError::JsonParseError {
            file: "vendor mapping".to_string(),
            message: e.to_string(),
        })?;
    Ok(VendorMapping::from_raw(raw))
}

/// 从 JSON 字符串解析供应商日程
///
/// 格式: `{"GFS": {"full_name": "...", "orders": [{"order_day": "Sunday", ...}]}}`
pub fn vendor_directory_from_json_str(json: &str) -> StoreResult<VendorDirectory> {
    let raw: BTreeMap<String, RawVendorEntry> =
        serde_json::from_str(json).map_err(|e| StoreError::JsonParseError {
            file: "vendor schedules".to_string(),
            message: e.to_string(),
        })?;

    let mut directory = VendorDirectory::new();
    for (vendor_id, entry) in raw {
        let mut windows = Vec::with_capacity(entry.orders.len());
        for order in entry.orders {
            windows.push(OrderWindow {
                order_day: parse_day(&order.order_day)?,
                delivery_day: parse_day(&order.delivery_day)?,
                covers: order
                    .covers
                    .iter()
                    .map(|d| parse_day(d))
                    .collect::<StoreResult<Vec<_>>>()?,
            });
        }
        directory.insert(
            vendor_id,
            VendorScheduleInfo {
                full_name: entry.full_name,
                windows,
                note: entry.note,
            },
        );
    }
    Ok(directory)
}

fn parse_day(name: &str) -> StoreResult<Weekday> {
    Weekday::parse(name).ok_or_else(|| StoreError::InvalidDayName {
        day: name.to_string(),
    })
}

// ==========================================
// ReferenceStore - 文件加载入口
// ==========================================

/// 参照数据文件加载器
///
/// 缺失文件按空表处理并记入告警; 存在但损坏的文件快速失败。
pub struct ReferenceStore;

impl ReferenceStore {
    /// 从三个 JSON 文件路径加载参照数据
    ///
    /// # 返回
    /// - `ReferenceData`: 校验通过的只读参照数据
    /// - `LoadReport`: 计数与告警 (缺文件/覆盖重叠/未映射食材)
    pub fn load_from_files(
        recipes_path: &Path,
        mapping_path: &Path,
        schedules_path: &Path,
    ) -> StoreResult<(ReferenceData, LoadReport)> {
        let mut warnings = Vec::new();

        let recipes = match read_optional(recipes_path, "recipes", &mut warnings)? {
            Some(json) => recipes_from_json_str(&json)?,
            None => RecipeBook::new(),
        };
        let vendor_mapping = match read_optional(mapping_path, "vendor mapping", &mut warnings)? {
            Some(json) => vendor_mapping_from_json_str(&json)?,
            None => VendorMapping::new(),
        };
        let vendor_directory =
            match read_optional(schedules_path, "vendor schedules", &mut warnings)? {
                Some(json) => vendor_directory_from_json_str(&json)?,
                None => VendorDirectory::new(),
            };

        let data = ReferenceData::new(recipes, vendor_mapping, vendor_directory);
        let report = data.build_report(warnings);

        tracing::info!(
            "参照数据加载完成: {} 配方, {} 映射, {} 供应商, {} 告警",
            report.recipe_count,
            report.mapping_count,
            report.vendor_count,
            report.warnings.len()
        );

        Ok((data, report))
    }
}

/// 读取可选文件: 不存在 → None + 告警, 读取失败 → 错误
fn read_optional(
    path: &Path,
    which: &str,
    warnings: &mut Vec<LoadWarning>,
) -> StoreResult<Option<String>> {
    if !path.exists() {
        warnings.push(LoadWarning::MissingFile {
            which: which.to_string(),
        });
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| StoreError::FileReadError {
            file: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UNMAPPED_VENDOR;

    #[test]
    fn test_recipes_from_json() {
        let json = r#"{
            "Burger": {
                "Bun": {"qty": 1, "unit": "each"},
                "Patty": {"qty": 1, "unit": "each"}
            }
        }"#;
        let book = recipes_from_json_str(json).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.lookup("BURGER").unwrap().ingredients.len(), 2);
    }

    #[test]
    fn test_recipes_bad_qty_fails() {
        let json = r#"{"Burger": {"Bun": {"qty": -1, "unit": "each"}}}"#;
        let err = recipes_from_json_str(json).unwrap_err();
        assert!(matches!(err, StoreError::InvalidIngredientQty { .. }));
    }

    #[test]
    fn test_vendor_directory_from_json() {
        let json = r##"{
            "GFS": {
                "full_name": "Gordon Food Service",
                "color": "#0ea5e9",
                "orders": [
                    {"order_day": "Sunday", "delivery_day": "Wednesday",
                     "covers": ["Wednesday", "Thursday"]}
                ]
            }
        }"##;
        let dir = vendor_directory_from_json_str(json).unwrap();
        assert_eq!(dir.windows("GFS").len(), 1);
        assert_eq!(dir.windows("GFS")[0].covers.len(), 2);
    }

    #[test]
    fn test_vendor_directory_bad_day_fails() {
        let json = r#"{
            "GFS": {
                "full_name": "Gordon Food Service",
                "orders": [
                    {"order_day": "Someday", "delivery_day": "Wednesday", "covers": []}
                ]
            }
        }"#;
        assert!(matches!(
            vendor_directory_from_json_str(json),
            Err(StoreError::InvalidDayName { .. })
        ));
    }

    #[test]
    fn test_report_flags_unmapped_recipe_ingredients() {
        let recipes = recipes_from_json_str(
            r#"{"Burger": {"Bun": {"qty": 1, "unit": "each"},
                           "Secret Sauce": {"qty": 0.5, "unit": "oz"}}}"#,
        )
        .unwrap();
        let mapping = vendor_mapping_from_json_str(r#"{"bun": "GFS"}"#).unwrap();
        let data = ReferenceData::new(recipes, mapping, VendorDirectory::new());

        let report = data.build_report(Vec::new());
        assert!(report.warnings.contains(&LoadWarning::UnmappedRecipeIngredient {
            ingredient: "Secret Sauce".to_string()
        }));
        // 未映射食材仍会在计算中归入 UNMAPPED 桶
        assert_eq!(data.vendor_mapping.vendor_for("Secret Sauce"), UNMAPPED_VENDOR);
    }
}
