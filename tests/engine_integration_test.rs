// ==========================================
// 引擎链路集成测试
// ==========================================
// 覆盖: 聚合 → 配方展开 → 星期分布 → 订单构建 的完整链路性质
// ==========================================


use restaurant_order_engine::config::DayOfWeekProfile;
use restaurant_order_engine::domain::{SalesBatch, Weekday, UNMAPPED_VENDOR};
use restaurant_order_engine::engine::{
    CalcWarning, DayAdjustments, IngredientUsageResolver, OrderCalculator, OrderOutcome,
    SalesAggregator, VendorOrder,
};
use std::collections::BTreeMap;

use test_helpers::{sales_batch, sales_record, test_recipes, test_vendor_mapping};

fn two_week_batches() -> Vec<SalesBatch> {
    vec![
        sales_batch(
            "ProductMix_2026-01-19_2026-01-25.xlsx",
            vec![
                sales_record("SMASH BURGER", Some(60.0), 900.0, "Food"),
                sales_record("Caesar Salad", Some(20.0), 280.0, "Food"),
                sales_record("House Margarita", Some(40.0), 480.0, "Liquor"),
            ],
        ),
        sales_batch(
            "ProductMix_2026-01-26_2026-02-01.xlsx",
            vec![
                sales_record("SMASH BURGER", Some(80.0), 1200.0, "Food"),
                sales_record("Caesar Salad", Some(20.0), 280.0, "Food"),
            ],
        ),
    ]
}

fn calculate(
    batches: &[SalesBatch],
    vendor: &str,
    covers: &[Weekday],
    waste_factor: f64,
) -> restaurant_order_engine::engine::OrderCalculation {
    OrderCalculator::new().calculate(
        batches,
        &test_recipes(),
        &test_vendor_mapping(),
        &DayOfWeekProfile::default(),
        &DayAdjustments::none(),
        &BTreeMap::new(),
        vendor,
        covers,
        waste_factor,
        true,
    )
}

fn expect_order(calculation: &restaurant_order_engine::engine::OrderCalculation) -> &VendorOrder {
    match &calculation.outcome {
        OrderOutcome::Order(order) => order,
        OrderOutcome::NoMappedIngredients => panic!("expected an order"),
    }
}

// ==========================================
// 完整链路数值
// ==========================================

#[test]
fn test_full_chain_burger_order() {
    // 两周平均 70 个汉堡 → Bun 70/周, Patty 140/周
    // 周三+周四权重 0.18+0.20 = 0.38, 损耗 ×1.10
    let covers = [Weekday::Wednesday, Weekday::Thursday];
    let calculation = calculate(&two_week_batches(), "GFS", &covers, 1.10);
    let order = expect_order(&calculation);

    let bun = order.lines.iter().find(|l| l.ingredient == "Bun").unwrap();
    let patty = order.lines.iter().find(|l| l.ingredient == "Patty").unwrap();
    assert_eq!(bun.order_qty, 29.26); // 70 × 0.38 = 26.6, ×1.10
    assert_eq!(patty.order_qty, 58.52);
    assert_eq!(bun.unit, "each");

    // 订货量降序
    assert_eq!(order.lines[0].ingredient, "Patty");
}

#[test]
fn test_closed_days_zero_through_chain() {
    let covers = [Weekday::Wednesday, Weekday::Thursday];
    let calculation = calculate(&two_week_batches(), "GFS", &covers, 1.10);

    for line in &expect_order(&calculation).lines {
        assert_eq!(line.daily_qty[Weekday::Monday.index()], 0.0);
        assert_eq!(line.daily_qty[Weekday::Tuesday.index()], 0.0);
    }
}

#[test]
fn test_day_weights_conserve_weekly_total() {
    // 全部七日覆盖 + 无损耗 → 订货量 = 周用量
    let covers: Vec<Weekday> = restaurant_order_engine::domain::DAY_ORDER.to_vec();
    let calculation = calculate(&two_week_batches(), "GFS", &covers, 1.0);
    let order = expect_order(&calculation);

    let bun = order.lines.iter().find(|l| l.ingredient == "Bun").unwrap();
    assert!((bun.order_qty - 70.0).abs() < 0.01);
}

// ==========================================
// 供应商划分性质
// ==========================================

#[test]
fn test_vendor_partition_is_disjoint_and_total() {
    // 每种食材恰好归属一个供应商 (UNMAPPED 也是桶)
    let aggregator = SalesAggregator::new();
    let averages = aggregator.aggregate(&two_week_batches());
    let resolution = IngredientUsageResolver::new().resolve(
        &averages,
        &test_recipes(),
        &test_vendor_mapping(),
        &BTreeMap::new(),
    );

    let counts = resolution.count_by_vendor();
    let total: usize = counts.values().sum();
    assert_eq!(total, resolution.usage.len());

    // American Cheese 无映射 → UNMAPPED 桶
    assert_eq!(counts[UNMAPPED_VENDOR], 1);
    assert_eq!(resolution.usage["american cheese"].vendor, UNMAPPED_VENDOR);
    assert_eq!(counts["GFS"], 2);
    assert_eq!(counts["WCW"], 2);
}

#[test]
fn test_unmapped_bucket_is_orderable() {
    // UNMAPPED 桶照常出单, 供操作员核查遗漏
    let covers = [Weekday::Wednesday, Weekday::Thursday];
    let calculation = calculate(&two_week_batches(), UNMAPPED_VENDOR, &covers, 1.0);
    let order = expect_order(&calculation);

    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].ingredient, "American Cheese");
    // 2 slice × 70 = 140/周, ×0.38
    assert!((order.lines[0].order_qty - 53.2).abs() < 0.01);
}

// ==========================================
// 确定性与单调性
// ==========================================

#[test]
fn test_same_input_byte_identical_output() {
    let covers = [Weekday::Friday, Weekday::Saturday, Weekday::Sunday];
    let a = calculate(&two_week_batches(), "GFS", &covers, 1.15);
    let b = calculate(&two_week_batches(), "GFS", &covers, 1.15);

    let json_a = serde_json::to_string(&a.outcome).unwrap();
    let json_b = serde_json::to_string(&b.outcome).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_waste_factor_monotonic_through_chain() {
    let covers = [Weekday::Wednesday, Weekday::Thursday];
    let total_at = |factor: f64| {
        let calculation = calculate(&two_week_batches(), "GFS", &covers, factor);
        expect_order(&calculation).total_units
    };

    assert!(total_at(1.0) <= total_at(1.1));
    assert!(total_at(1.1) <= total_at(1.25));
}

// ==========================================
// 告警与缺口信号
// ==========================================

#[test]
fn test_empty_inputs_surface_warnings() {
    let calculation = calculate(&[], "GFS", &[Weekday::Wednesday], 1.1);

    assert!(calculation.warnings.contains(&CalcWarning::NoSalesBatches));
    // 零输入下该供应商没有任何映射食材可出单
    assert!(matches!(
        calculation.outcome,
        OrderOutcome::NoMappedIngredients
    ));
}

#[test]
fn test_missing_schedule_is_warning_not_error() {
    let calculation = OrderCalculator::new().calculate(
        &two_week_batches(),
        &test_recipes(),
        &test_vendor_mapping(),
        &DayOfWeekProfile::default(),
        &DayAdjustments::none(),
        &BTreeMap::new(),
        "GFS",
        &[Weekday::Wednesday],
        1.1,
        false,
    );

    assert!(calculation.warnings.contains(&CalcWarning::NoScheduleForVendor {
        vendor: "GFS".to_string()
    }));
    // 计算照常完成
    assert!(matches!(calculation.outcome, OrderOutcome::Order(_)));
}

#[test]
fn test_unmapped_ingredients_warning_count() {
    let covers = [Weekday::Wednesday];
    let calculation = calculate(&two_week_batches(), "GFS", &covers, 1.0);

    assert!(calculation
        .warnings
        .contains(&CalcWarning::UnmappedIngredients { count: 1 }));
}

#[test]
fn test_unmatched_items_partitioned_by_category() {
    let covers = [Weekday::Wednesday];
    let mut batches = two_week_batches();
    batches.push(sales_batch(
        "ProductMix_2026-02-02_2026-02-08.xlsx",
        vec![sales_record("Daily Special", Some(12.0), 180.0, "Food")],
    ));
    let calculation = calculate(&batches, "GFS", &covers, 1.0);

    assert_eq!(calculation.unmatched_food_items, vec!["Daily Special"]);
    assert_eq!(calculation.unmatched_other_items, vec!["House Margarita"]);
}
