use super::BatchScheduler;
use crate::domain::calendar::ShiftRule;
use crate::domain::order::PlannedOrder;
use crate::domain::rate::Rate;
use crate::domain::schedule::{LineFlag, UnpricedReason};
use crate::engine::calendar::WorkCalendar;
use crate::engine::error::EngineError;
use crate::engine::projector::WorkProjector;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::collections::BTreeMap;

// ==========================================
// 测试辅助函数
// ==========================================

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap().and_time(hm(h, m))
}

fn plant_calendar() -> WorkCalendar {
    let mut rules = Vec::new();
    for weekday in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu] {
        rules.push(
            ShiftRule::new(weekday, hm(6, 30), hm(17, 0))
                .unwrap()
                .with_break(hm(12, 0), hm(13, 0))
                .unwrap(),
        );
    }
    rules.push(
        ShiftRule::new(Weekday::Fri, hm(8, 30), hm(17, 0))
            .unwrap()
            .with_break(hm(12, 0), hm(13, 0))
            .unwrap()
            .restricted_to(["A", "B"]),
    );
    WorkCalendar::new(rules).unwrap()
}

fn rates() -> BTreeMap<String, Rate> {
    BTreeMap::from([
        ("A".to_string(), Rate::PerUnit(2.0)),
        ("C".to_string(), Rate::PerUnit(1.0)),
        ("U".to_string(), Rate::Undefined),
    ])
}

// ==========================================
// 正常案例
// ==========================================

#[test]
fn test_lines_follow_input_order_with_running_total() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let orders = vec![PlannedOrder::new("A", 30), PlannedOrder::new("C", 60)];

    let result = scheduler.schedule(&orders, &rates(), at(3, 6, 30), None).unwrap();

    assert_eq!(result.total_minutes, 120.0);
    assert_eq!(result.lines.len(), 2);
    assert_eq!(result.lines[0].order.category.as_str(), "A");
    assert_eq!(result.lines[0].minutes, Some(60.0));
    assert_eq!(result.lines[0].cumulative_minutes, 60.0);
    assert_eq!(result.lines[0].completed_at, Some(at(3, 7, 30)));
    assert_eq!(result.lines[1].cumulative_minutes, 120.0);
    assert_eq!(result.lines[1].started_at, Some(at(3, 7, 30)));
    assert_eq!(result.completion_instant, at(3, 8, 30));
    assert_eq!(result.meets_deadline, None);
    assert!(result.is_complete());
}

#[test]
fn test_order_sequence_changes_completion_under_mixed_eligibility() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let start = at(6, 16, 0); // 周四下午

    let a_then_c = vec![PlannedOrder::new("A", 30), PlannedOrder::new("C", 60)];
    let c_then_a = vec![PlannedOrder::new("C", 60), PlannedOrder::new("A", 30)];

    let first = scheduler.schedule(&a_then_c, &rates(), start, None).unwrap();
    let second = scheduler.schedule(&c_then_a, &rates(), start, None).unwrap();

    // A 用完周四,C 周五不准入 -> 下周一
    assert_eq!(first.completion_instant, at(10, 7, 30));
    assert_eq!(first.lines[1].started_at, Some(at(10, 6, 30)));
    // C 用完周四,A 周五可开工
    assert_eq!(second.completion_instant, at(7, 9, 30));

    assert_eq!(first.total_minutes, second.total_minutes);
    assert_eq!(first.lines[0].order.category.as_str(), "A");
    assert_eq!(second.lines[0].order.category.as_str(), "C");
}

#[test]
fn test_deadline_check() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let orders = vec![PlannedOrder::new("C", 60), PlannedOrder::new("A", 30)];

    let met = scheduler
        .schedule(&orders, &rates(), at(6, 16, 0), Some(at(7, 12, 0)))
        .unwrap();
    assert_eq!(met.meets_deadline, Some(true));

    // 完工时刻恰等于交期也算达成
    let exact = scheduler
        .schedule(&orders, &rates(), at(6, 16, 0), Some(at(7, 9, 30)))
        .unwrap();
    assert_eq!(exact.meets_deadline, Some(true));

    let missed = scheduler
        .schedule(&orders, &rates(), at(6, 16, 0), Some(at(7, 9, 0)))
        .unwrap();
    assert_eq!(missed.meets_deadline, Some(false));
}

// ==========================================
// 降级案例
// ==========================================

#[test]
fn test_unpriced_orders_are_flagged_not_zeroed() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let orders = vec![
        PlannedOrder::new("A", 30),
        PlannedOrder::new("D", 5),
        PlannedOrder::new("U", 5),
        PlannedOrder::new("C", 60),
    ];

    let result = scheduler.schedule(&orders, &rates(), at(3, 6, 30), None).unwrap();

    assert_eq!(result.total_minutes, 120.0);
    assert_eq!(result.unpriced_count(), 2);
    assert!(!result.is_complete());
    assert_eq!(
        result.lines[1].flag,
        Some(LineFlag::UnpricedOrder(UnpricedReason::MissingRate))
    );
    assert_eq!(
        result.lines[2].flag,
        Some(LineFlag::UnpricedOrder(UnpricedReason::UndefinedRate))
    );
    assert_eq!(result.lines[1].minutes, None);
    assert_eq!(result.lines[1].cumulative_minutes, 60.0);
    // 未定价订单不推进时间链
    assert_eq!(result.lines[3].started_at, Some(at(3, 7, 30)));
    assert_eq!(result.completion_instant, at(3, 8, 30));
}

#[test]
fn test_unusable_rates_are_flagged_without_aborting() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let mut table = rates();
    table.insert("N".to_string(), Rate::PerUnit(-1.0));
    table.insert("Q".to_string(), Rate::PerUnit(f64::NAN));
    let orders = vec![
        PlannedOrder::new("A", 10),
        PlannedOrder::new("N", 1),
        PlannedOrder::new("Q", 4),
    ];

    let result = scheduler.schedule(&orders, &table, at(3, 6, 30), None).unwrap();

    assert_eq!(result.unpriced_count(), 2);
    assert_eq!(
        result.lines[1].flag,
        Some(LineFlag::UnpricedOrder(UnpricedReason::InvalidRate))
    );
    assert_eq!(
        result.lines[2].flag,
        Some(LineFlag::UnpricedOrder(UnpricedReason::InvalidRate))
    );
    assert_eq!(result.total_minutes, 20.0);
    assert_eq!(result.completion_instant, at(3, 6, 50));
}

#[test]
fn test_tiny_order_starts_no_later_than_it_completes() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let table = BTreeMap::from([("A".to_string(), Rate::PerUnit(1e-6))]);
    let orders = vec![PlannedOrder::new("A", 1)];

    // 周六起算
    let result = scheduler.schedule(&orders, &table, at(8, 10, 0), None).unwrap();
    let line = &result.lines[0];
    assert_eq!(line.started_at, Some(at(10, 6, 30)));
    assert!(line.started_at <= line.completed_at);
    assert!(result.completion_instant > at(10, 6, 30));
}

#[test]
fn test_all_unpriced_completes_at_start() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let orders = vec![PlannedOrder::new("X", 3)];

    let result = scheduler.schedule(&orders, &rates(), at(8, 10, 0), None).unwrap();
    assert_eq!(result.total_minutes, 0.0);
    assert_eq!(result.completion_instant, at(8, 10, 0));
    assert_eq!(result.unpriced_count(), 1);
}

#[test]
fn test_empty_batch() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let result = scheduler
        .schedule(&[], &rates(), at(3, 9, 0), Some(at(3, 9, 0)))
        .unwrap();
    assert!(result.lines.is_empty());
    assert_eq!(result.completion_instant, at(3, 9, 0));
    assert_eq!(result.meets_deadline, Some(true));
}

// ==========================================
// 失败案例
// ==========================================

#[test]
fn test_zero_quantity_aborts() {
    let cal = plant_calendar();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal));
    let orders = vec![PlannedOrder::new("A", 1), PlannedOrder::new("C", 0)];

    assert!(matches!(
        scheduler.schedule(&orders, &rates(), at(3, 6, 30), None),
        Err(EngineError::InvalidOrder { index: 1, .. })
    ));
}

#[test]
fn test_calendar_exhausted_aborts_whole_batch() {
    let rule = ShiftRule::new(Weekday::Mon, hm(8, 0), hm(16, 0))
        .unwrap()
        .restricted_to(["A"]);
    let cal = WorkCalendar::new([rule]).unwrap();
    let scheduler = BatchScheduler::new(WorkProjector::new(&cal).with_max_days(14));
    let orders = vec![PlannedOrder::new("A", 10), PlannedOrder::new("C", 10)];

    assert!(matches!(
        scheduler.schedule(&orders, &rates(), at(3, 8, 0), None),
        Err(EngineError::CalendarExhausted { .. })
    ));
}
