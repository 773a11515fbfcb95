// ==========================================
// 餐厅周订货系统 - 配方实体
// ==========================================
// 职责: 成品菜 → 食材用量的参照数据
// 红线: 配方数量非正/非数值属结构性坏数据, 构建期即失败
// ==========================================

use crate::domain::types::normalize_key;
use crate::store::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 配方食材 (RecipeIngredient)
// ==========================================

/// 每售出一份成品所消耗的单种食材量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// 单份用量 (必须为正且有限)
    pub qty: f64,

    /// 计量单位 (如 "each" / "lb" / "oz")
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "each".to_string()
}

// ==========================================
// 配方 (Recipe)
// ==========================================

/// 单个成品菜的配方: 食材名 → 用量
///
/// 食材名保留原始大小写 (呈现用), 供应商查找时再做规范化。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// 成品菜显示名 (最后一次写入的原始大小写)
    pub display_name: String,

    /// 食材表, BTreeMap 保证遍历顺序确定
    pub ingredients: BTreeMap<String, RecipeIngredient>,
}

// ==========================================
// 配方集 (RecipeBook)
// ==========================================

/// 全部配方, 以规范化菜名为键
///
/// 同一规范化键重复出现时后写覆盖 (last-write-wins)。
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从原始映射构建并校验
    ///
    /// 校验规则: 每个食材 qty 必须为正且有限, 否则返回
    /// `StoreError::InvalidIngredientQty` 并指明配方与食材。
    pub fn from_raw(
        raw: BTreeMap<String, BTreeMap<String, RecipeIngredient>>,
    ) -> Result<Self, StoreError> {
        let mut book = Self::new();
        for (item_name, ingredients) in raw {
            book.insert(&item_name, ingredients)?;
        }
        Ok(book)
    }

    /// 插入单个配方 (校验食材数量)
    pub fn insert(
        &mut self,
        item_name: &str,
        ingredients: BTreeMap<String, RecipeIngredient>,
    ) -> Result<(), StoreError> {
        for (ing_name, ing) in &ingredients {
            if !ing.qty.is_finite() || ing.qty <= 0.0 {
                return Err(StoreError::InvalidIngredientQty {
                    recipe: item_name.to_string(),
                    ingredient: ing_name.clone(),
                    qty: ing.qty,
                });
            }
        }

        self.recipes.insert(
            normalize_key(item_name),
            Recipe {
                display_name: item_name.to_string(),
                ingredients,
            },
        );
        Ok(())
    }

    /// 按菜品名查找配方 (大小写不敏感)
    pub fn lookup(&self, item_name: &str) -> Option<&Recipe> {
        self.recipes.get(&normalize_key(item_name))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// 遍历全部配方 (按规范化键序)
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Recipe)> {
        self.recipes.iter()
    }

    /// 配方中出现过的全部食材名 (原始大小写, 去重)
    pub fn all_ingredient_names(&self) -> Vec<String> {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for recipe in self.recipes.values() {
            for name in recipe.ingredients.keys() {
                names.entry(normalize_key(name)).or_insert_with(|| name.clone());
            }
        }
        names.into_values().collect()
    }
}
