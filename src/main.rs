// ==========================================
// 餐厅周订货系统 - 命令行入口
// ==========================================
// 用法:
//   restaurant-order-engine <recipes.json> <vendor_mapping.json> \
//       <vendor_schedules.json> <vendor> <window_index> <waste_pct> \
//       <sales_batch.json> [sales_batch.json ...]
// 销售批次 JSON 形如: {"source_id": "...", "records": [{"item": ..., ...}]}
// ==========================================

use anyhow::{bail, Context};
use restaurant_order_engine::api::{OrderApi, OrderContext};
use restaurant_order_engine::config::DayOfWeekProfile;
use restaurant_order_engine::domain::{SalesBatch, DAY_ORDER};
use restaurant_order_engine::engine::OrderOutcome;
use restaurant_order_engine::store::ReferenceStore;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    restaurant_order_engine::logging::init();

    tracing::info!("==================================================");
    tracing::info!("餐厅周订货系统 - 订货量计算引擎");
    tracing::info!("系统版本: {}", restaurant_order_engine::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 7 {
        bail!(
            "参数不足: <recipes.json> <vendor_mapping.json> <vendor_schedules.json> \
             <vendor> <window_index> <waste_pct> <sales_batch.json>..."
        );
    }

    let (reference, report) = ReferenceStore::load_from_files(
        Path::new(&args[0]),
        Path::new(&args[1]),
        Path::new(&args[2]),
    )?;
    for warning in &report.warnings {
        println!("[告警] {warning}");
    }

    let vendor = &args[3];
    let window_index: usize = args[4]
        .parse()
        .with_context(|| format!("窗口下标无法解析: {}", args[4]))?;
    let waste_pct: f64 = args[5]
        .parse()
        .with_context(|| format!("损耗百分比无法解析: {}", args[5]))?;

    let mut context = OrderContext::new();
    for path in &args[6..] {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("销售批次文件读取失败: {path}"))?;
        let batch: SalesBatch =
            serde_json::from_str(&json).with_context(|| format!("销售批次解析失败: {path}"))?;
        context.add_batch(batch)?;
    }

    let api = OrderApi::new();
    let profile = DayOfWeekProfile::default();

    let windows = api.order_windows(&reference, vendor)?;
    match windows.get(window_index) {
        Some(window) => println!("\n{vendor}: {}", window.label()),
        None => bail!("供应商 {vendor} 没有下标为 {window_index} 的订货窗口"),
    }

    let calculation = api.calculate_order_for_window(
        &reference,
        &profile,
        &context,
        vendor,
        window_index,
        waste_pct,
        Default::default(),
    )?;

    for warning in &calculation.warnings {
        println!("[告警] {warning}");
    }

    match &calculation.outcome {
        OrderOutcome::NoMappedIngredients => {
            println!("供应商 {vendor} 无任何映射食材, 请检查供应商映射配置。");
        }
        OrderOutcome::Order(order) => {
            println!("\n{:<24} {}  ORDER QTY  UNIT", "INGREDIENT", day_header());
            for line in &order.lines {
                let days = line
                    .daily_qty
                    .iter()
                    .map(|q| format!("{q:>6.1}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{:<24} {days}  {:>9.2}  {}",
                    line.ingredient, line.order_qty, line.unit
                );
            }
            println!(
                "\n共 {} 种食材, 合计 {:.2} 单位",
                order.ingredient_count, order.total_units
            );
        }
    }

    if !calculation.unmatched_food_items.is_empty() {
        println!(
            "\n缺配方的食品类单品 ({}): {}",
            calculation.unmatched_food_items.len(),
            calculation.unmatched_food_items.join(", ")
        );
    }

    Ok(())
}

fn day_header() -> String {
    DAY_ORDER
        .iter()
        .map(|d| format!("{:>6}", d.short_name()))
        .collect::<Vec<_>>()
        .join(" ")
}
