// ==========================================
// 批次排程集成测试
// ==========================================
// 测试目标: 历史记录 → 费率 → 批次排程 全流程
// ==========================================


use seal_planner::config::PlannerConfig;
use seal_planner::{
    Dimension, LineFlag, PlannedOrder, PlanningApi, Rate, UnpricedReason,
};
use test_helpers::{at, RecordBuilder};

/// 周五仅允许 A/B 的测试日历
fn api() -> PlanningApi {
    let raw = r#"{
        "calendar": [
            { "weekday": "Mon", "start": "06:30", "end": "17:00", "break_start": "12:00", "break_end": "13:00" },
            { "weekday": "Tue", "start": "06:30", "end": "17:00", "break_start": "12:00", "break_end": "13:00" },
            { "weekday": "Wed", "start": "06:30", "end": "17:00", "break_start": "12:00", "break_end": "13:00" },
            { "weekday": "Thu", "start": "06:30", "end": "17:00", "break_start": "12:00", "break_end": "13:00" },
            { "weekday": "Fri", "start": "08:30", "end": "17:00", "break_start": "12:00", "break_end": "13:00",
              "allowed_categories": ["A", "B"] }
        ]
    }"#;
    PlanningApi::from_config(PlannerConfig::from_json_str(raw).unwrap()).unwrap()
}

fn history() -> Vec<seal_planner::HistoricalRecord> {
    vec![
        RecordBuilder::new("A").output(6, 12.0).build(),
        RecordBuilder::new("A").day(4).output(4, 8.0).build(),
        RecordBuilder::new("C").output(5, 5.0).build(),
        RecordBuilder::new("D").output(0, 30.0).build(),
    ]
}

#[test]
fn test_rates_from_history() {
    let api = api();
    let rates = api.estimate_rates(&history(), Dimension::SealType);

    assert_eq!(rates.get("A"), Some(&Rate::PerUnit(2.0)));
    assert_eq!(rates.get("C"), Some(&Rate::PerUnit(1.0)));
    // 件数为 0 的分组不可定价
    assert!(!rates.contains_key("D"));

    let breakdown = api.throughput_breakdown(&history(), Dimension::SealType);
    assert_eq!(breakdown["D"].rate, Rate::Undefined);
    assert_eq!(breakdown["A"].record_count, 2);
}

#[test]
fn test_schedule_with_zero_output_category() {
    let api = api();
    let rates = api.estimate_rates(&history(), Dimension::SealType);
    let orders = vec![
        PlannedOrder::new("A", 10),
        PlannedOrder::new("D", 3),
        PlannedOrder::new("C", 60),
    ];

    let result = api
        .schedule_batch(&orders, &rates, at(6, 15, 0), Some(at(6, 17, 0)))
        .unwrap();

    assert_eq!(result.total_minutes, 80.0);
    assert_eq!(result.completion_instant, at(6, 16, 20));
    assert_eq!(result.meets_deadline, Some(true));
    assert_eq!(result.unpriced_count(), 1);
    assert!(!result.is_complete());

    let d_line = &result.lines[1];
    assert_eq!(
        d_line.flag,
        Some(LineFlag::UnpricedOrder(UnpricedReason::MissingRate))
    );
    assert_eq!(d_line.minutes, None);
    assert_eq!(d_line.completed_at, None);

    // 未定价订单不推进时间
    assert_eq!(result.lines[0].completed_at, Some(at(6, 15, 20)));
    assert_eq!(result.lines[2].started_at, Some(at(6, 15, 20)));
    assert_eq!(result.lines[2].cumulative_minutes, 80.0);
}

#[test]
fn test_order_sequence_changes_completion() {
    let api = api();
    let rates = api.estimate_rates(&history(), Dimension::SealType);

    let a_then_c = vec![PlannedOrder::new("A", 60), PlannedOrder::new("C", 60)];
    let c_then_a = vec![PlannedOrder::new("C", 60), PlannedOrder::new("A", 60)];

    let first = api.schedule_batch(&a_then_c, &rates, at(6, 15, 0), None).unwrap();
    let second = api.schedule_batch(&c_then_a, &rates, at(6, 15, 0), None).unwrap();

    assert_eq!(first.total_minutes, second.total_minutes);
    // C 不能在周五开工,只能顺延到下周一
    assert_eq!(first.completion_instant, at(10, 7, 30));
    assert_eq!(second.completion_instant, at(7, 9, 30));
    assert_eq!(first.meets_deadline, None);
}

#[test]
fn test_missed_deadline_is_reported_not_rejected() {
    let api = api();
    let rates = api.estimate_rates(&history(), Dimension::SealType);
    let orders = vec![PlannedOrder::new("C", 600)];

    let result = api
        .schedule_batch(&orders, &rates, at(3, 6, 30), Some(at(3, 17, 0)))
        .unwrap();
    assert_eq!(result.completion_instant, at(4, 7, 0));
    assert_eq!(result.meets_deadline, Some(false));

    // 截止时刻早于开始时刻同样只报告未达成
    let result = api
        .schedule_batch(&orders, &rates, at(3, 6, 30), Some(at(2, 8, 0)))
        .unwrap();
    assert_eq!(result.meets_deadline, Some(false));
}

#[test]
fn test_projection_through_api() {
    let api = api();
    let done = api
        .project_completion(at(3, 6, 30), 480.0, &"A".into())
        .unwrap();
    assert_eq!(done, at(3, 15, 30));
}
