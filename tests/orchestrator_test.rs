// ==========================================
// CapacityPlanner 编排器集成测试
// ==========================================
// 测试目标: 配置读取 → 产能参数 → 倒排 / What-if 全流程
// 日历: 2026-01-12 为周一，2026-01-16 为周五
// ==========================================

mod helpers;
mod test_helpers;

use helpers::mock_config::MockConfig;
use helpers::test_data_builder::{date, JobBuilder};
use labor_schedule::config::ConfigManager;
use labor_schedule::domain::job::WhatIfToggles;
use labor_schedule::engine::{
    select_schedulable_jobs, CapacityPlanner, EngineError, SchedulerOptions,
};
use labor_schedule::logging;
use labor_schedule::RawJobRecord;
use std::sync::Arc;

const EPS: f64 = 1e-6;

fn this_week_only() -> SchedulerOptions {
    SchedulerOptions::default().with_not_before(Some(date(2026, 1, 12)))
}

#[tokio::test]
async fn test_load_parameters_normalizes_week() {
    logging::init_test();
    let planner = CapacityPlanner::new(Arc::new(MockConfig::with_employees(4)));

    let params = planner.load_parameters(true).await.unwrap();
    assert_eq!(params.employee_count, 4);
    assert!(params.include_overtime);
    assert_eq!(params.work_week.day_at(1).unwrap().standard_hours(), 8.0);
    assert!(!params.work_week.day_at(6).unwrap().enabled);
}

#[tokio::test]
async fn test_zero_employees_rejected() {
    let planner = CapacityPlanner::new(Arc::new(MockConfig::with_employees(0)));

    let err = planner.load_parameters(false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<EngineError>(),
        Some(EngineError::InvalidInput(_))
    ));

    let jobs = vec![JobBuilder::new("A").build()];
    assert!(planner.schedule_jobs(&jobs, false).await.is_err());
}

#[tokio::test]
async fn test_schedule_jobs_rush_first() {
    logging::init_test();
    let config = MockConfig::default().options(this_week_only());
    let planner = CapacityPlanner::new(Arc::new(config));

    let jobs = vec![
        JobBuilder::new("NORMAL").hours(40.0).build(),
        JobBuilder::new("RUSH").hours(40.0).rush().build(),
    ];
    let output = planner.schedule_jobs(&jobs, false).await.unwrap();

    assert_eq!(output.result_for("RUSH").unwrap().unscheduled_hours, 0.0);
    assert!((output.result_for("NORMAL").unwrap().unscheduled_hours - 40.0).abs() < EPS);
    assert_eq!(output.day_usage.len(), 5);
}

#[tokio::test]
async fn test_not_before_override_keeps_hours_out_of_the_past() {
    logging::init_test();
    let config = Arc::new(MockConfig::default());
    let jobs = vec![JobBuilder::new("A").hours(50.0).build()];

    // 无下限：周五截止的 50h 会继续倒排到上周
    let unbounded = CapacityPlanner::new(config.clone());
    let output = unbounded.schedule_jobs(&jobs, false).await.unwrap();
    assert_eq!(output.result_for("A").unwrap().unscheduled_hours, 0.0);
    assert!(output.day_usage.iter().any(|(d, _)| *d < date(2026, 1, 12)));

    let floored = CapacityPlanner::new(config).with_not_before(Some(date(2026, 1, 12)));
    let options = floored.load_options().await.unwrap();
    assert_eq!(options.not_before, Some(date(2026, 1, 12)));

    let output = floored.schedule_jobs(&jobs, false).await.unwrap();
    let result = output.result_for("A").unwrap();
    assert!((result.unscheduled_hours - 10.0).abs() < EPS);
    assert!(output.day_usage.iter().all(|(d, _)| *d >= date(2026, 1, 12)));
}

#[tokio::test]
async fn test_schedule_jobs_rejects_non_positive_hours() {
    let planner = CapacityPlanner::new(Arc::new(MockConfig::default()));
    let jobs = vec![JobBuilder::new("A").hours(-1.0).build()];

    let err = planner.schedule_jobs(&jobs, false).await.unwrap_err();
    assert!(err.downcast_ref::<EngineError>().is_some());
}

#[tokio::test]
async fn test_what_if_against_scheduled_ledger() {
    logging::init_test();
    let config = MockConfig::with_weekday_overtime().options(this_week_only());
    let planner = CapacityPlanner::new(Arc::new(config));

    // 占用周三至周五的常规产能
    let jobs = vec![JobBuilder::new("A").hours(24.0).build()];
    let output = planner.schedule_jobs(&jobs, false).await.unwrap();
    assert_eq!(output.results[0].start_date, date(2026, 1, 14));
    assert_eq!(output.total_overtime_hours(), 0.0);

    let toggles = WhatIfToggles {
        allow_overtime: true,
        target_due_date: Some(date(2026, 1, 16)),
    };
    let projection = planner
        .what_if(24.0, date(2026, 1, 12), &output.day_usage, toggles)
        .await
        .unwrap();

    // 仅常规: 周一、周二各 8，余 8 落到下周一
    assert_eq!(
        projection.earliest_regular.completion_date,
        Some(date(2026, 1, 19))
    );

    // 允许加班: 周一 10、周二 10、周三 2、周四 2
    let with_ot = projection.earliest_with_overtime.unwrap();
    assert_eq!(with_ot.completion_date, Some(date(2026, 1, 15)));
    assert!((with_ot.overtime_hours - 8.0).abs() < EPS);

    let regular_fit = projection.due_date_fit_regular.unwrap();
    assert!((regular_fit.remaining_hours - 8.0).abs() < EPS);
    let overtime_fit = projection.due_date_fit_with_overtime.unwrap();
    assert_eq!(overtime_fit.remaining_hours, 0.0);
    assert_eq!(overtime_fit.completion_date, Some(date(2026, 1, 15)));
    assert_eq!(projection.overtime_needed_hours, Some(8.0));
}

#[tokio::test]
async fn test_end_to_end_with_config_store() {
    let (_temp_file, db_path) = test_helpers::create_test_db().expect("Failed to create test db");
    let conn = test_helpers::open_test_connection(&db_path).expect("Failed to open db");
    test_helpers::insert_test_config(&conn).expect("Failed to insert test config");

    let config = Arc::new(ConfigManager::new(&db_path).expect("Failed to create ConfigManager"));
    let planner = CapacityPlanner::new(config);

    let records: Vec<RawJobRecord> = serde_json::from_str(
        r#"[
            {"id": "W-100", "dueDate": "2026-01-16", "requiredHours": 60},
            {"id": "W-101", "requiredHours": 5},
            {"id": "W-102", "dueDate": "2026-01-16", "requiredHours": 0}
        ]"#,
    )
    .unwrap();
    let intake = select_schedulable_jobs(&records).unwrap();
    assert_eq!(intake.jobs.len(), 1);
    assert_eq!(intake.excluded.len(), 2);

    // 3 人 × 8 小时: 周五 24、周四 24、周三 12
    let regular = planner.schedule_jobs(&intake.jobs, false).await.unwrap();
    let result = &regular.results[0];
    assert_eq!(result.start_date, date(2026, 1, 14));
    assert_eq!(result.overtime_hours, 0.0);
    assert!((result.allocations[0].scheduled_hours - 12.0).abs() < EPS);

    // 加班开启: 每日 24 + 6
    let with_ot = planner.schedule_jobs(&intake.jobs, true).await.unwrap();
    let result = &with_ot.results[0];
    assert_eq!(result.start_date, date(2026, 1, 15));
    assert!((result.overtime_hours - 12.0).abs() < EPS);
    assert!(result.allocations.iter().all(|a| (a.capacity_hours - 30.0).abs() < EPS));
}
