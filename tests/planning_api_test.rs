// ==========================================
// PlanningApi / 配置 集成测试
// ==========================================
// 测试目标: 默认车间日历、按名称估算、看板统计、配置加载
// ==========================================


use seal_planner::config::{ConfigError, ConfigManager, PlannerConfig};
use seal_planner::{
    ApiError, Category, DatePreset, DayFilter, Dimension, EngineError, PlannedOrder, PlanningApi, Rate,
    RateBasis, RecordWindow, SealType,
};
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{at, date, RecordBuilder};

fn default_api() -> PlanningApi {
    PlanningApi::from_config(PlannerConfig::default()).unwrap()
}

fn ledger() -> Vec<seal_planner::HistoricalRecord> {
    vec![
        RecordBuilder::new("Standard Soft").company("Acme").operator("anna").output(50, 100.0).build(),
        RecordBuilder::new("Standard Soft").company("Beta").operator("jan").output(30, 60.0)
            .downtime(15.0, "Material").build(),
        RecordBuilder::new("Custom Hard").day(4).company("Acme").operator("jan").output(10, 80.0)
            .downtime(20.0, "Setup").build(),
        RecordBuilder::new("V-Rings").day(4).company("Cobalt").operator("li").output(20, 30.0)
            .downtime(5.0, "Material").build(),
    ]
}

#[test]
fn test_default_calendar_friday_restriction() {
    let api = default_api();
    let thursday_late = at(6, 16, 30);

    // 标准硬质件允许周五开工
    let hard = api
        .project_completion(thursday_late, 60.0, &SealType::StandardHard.category())
        .unwrap();
    assert_eq!(hard, at(7, 9, 0));

    // 定制软质件顺延到下周一
    let soft = api
        .project_completion(thursday_late, 60.0, &SealType::CustomSoft.category())
        .unwrap();
    assert_eq!(soft, at(10, 7, 0));
}

#[test]
fn test_estimate_rates_by_name() {
    let api = default_api();
    let records = ledger();

    let by_type = api.estimate_rates_by_name(&records, "Seal Type").unwrap();
    assert_eq!(by_type["Standard Soft"], Rate::PerUnit(2.0));
    assert_eq!(by_type["Custom Hard"], Rate::PerUnit(8.0));

    let by_company = api.estimate_rates_by_name(&records, "company").unwrap();
    assert_eq!(by_company["Acme"], Rate::PerUnit(3.0));

    let err = api.estimate_rates_by_name(&records, "shift").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_downtime_basis_changes_rates() {
    let config = PlannerConfig {
        rate_basis: RateBasis::IncludingDowntime,
        ..PlannerConfig::default()
    };
    let api = PlanningApi::from_config(config).unwrap();

    let rates = api.estimate_rates(&ledger(), Dimension::SealType);
    assert_eq!(rates["Custom Hard"], Rate::PerUnit(10.0));
    assert_eq!(rates["V-Rings"], Rate::PerUnit(1.75));
}

#[test]
fn test_production_summary() {
    let summary = default_api().production_summary(&ledger());

    assert_eq!(summary.record_count, 4);
    // 06-03: 80 件, 06-04: 30 件
    assert_eq!(summary.average_daily_units, Some(55.0));

    let companies: Vec<(&str, u64)> = summary
        .top_companies
        .iter()
        .map(|g| (g.key.as_str(), g.units))
        .collect();
    assert_eq!(companies, vec![("Acme", 60), ("Beta", 30), ("Cobalt", 20)]);

    // 分钟数相同按原因名排序
    let downtime: Vec<(&str, f64, usize)> = summary
        .downtime_by_reason
        .iter()
        .map(|d| (d.reason.as_str(), d.minutes, d.occurrences))
        .collect();
    assert_eq!(downtime, vec![("Material", 20.0, 2), ("Setup", 20.0, 1)]);
}

#[test]
fn test_window_limits_history_before_estimation() {
    let api = default_api();
    let mut records = ledger();
    // 周六加班记录与一条早期记录
    records.push(RecordBuilder::new("Standard Soft").day(8).company("Acme").output(10, 100.0).build());
    records.push(RecordBuilder::new("Standard Soft").day(1).company("Beta").output(10, 50.0).build());

    let all = api.estimate_rates(&records, Dimension::SealType);
    assert_eq!(all["Standard Soft"], Rate::PerUnit(310.0 / 100.0));

    let week = RecordWindow::between(date(3), date(9)).with_days(DayFilter::Weekdays);
    let rates = api
        .estimate_rates_within(&records, Dimension::SealType, &week)
        .unwrap();
    assert_eq!(rates["Standard Soft"], Rate::PerUnit(2.0));

    // 默认日历周五有班次,周末没有
    let shift_days = RecordWindow::all().with_days(DayFilter::ShiftDays);
    let summary = api.production_summary_within(&records, &shift_days).unwrap();
    assert_eq!(summary.record_count, 4);

    let last_week = RecordWindow::preset(DatePreset::LastWeek, date(9));
    let summary = api.production_summary_within(&records, &last_week).unwrap();
    assert_eq!(summary.record_count, 5);

    let inverted = RecordWindow::between(date(9), date(3));
    assert!(matches!(
        api.filter_records(&records, &inverted),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_config_file_drives_search_limit() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "calendar": [
                {{ "weekday": "Fri", "start": "08:00", "end": "12:00", "allowed_categories": ["Stack"] }}
            ],
            "max_search_days": 10
        }}"#
    )
    .unwrap();

    let api = PlanningApi::new(ConfigManager::load(file.path()).unwrap());
    let err = api
        .schedule_batch(
            &[PlannedOrder::new("Special", 1)],
            &[("Special".to_string(), Rate::PerUnit(5.0))].into_iter().collect(),
            at(3, 8, 0),
            None,
        )
        .unwrap_err();

    match err {
        ApiError::Engine(EngineError::CalendarExhausted { category, max_days, .. }) => {
            assert_eq!(category, Category::new("Special"));
            assert_eq!(max_days, 10);
        }
        other => panic!("意外错误: {other:?}"),
    }
}

#[test]
fn test_invalid_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "calendar": [ {{ "weekday": "Mon", "start": "17:00", "end": "06:30" }} ] }}"#
    )
    .unwrap();

    let err = ConfigManager::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Calendar(_)));

    let err = ConfigManager::load("/nonexistent/planner.json").unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError { .. }));
}
