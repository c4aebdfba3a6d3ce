// ==========================================
// 人工排程引擎 - 引擎层
// ==========================================
// 职责: 作息规范化、日产能计算、倒排与正推试算
// 红线: 引擎不做 I/O，不访问数据库；产能不足以缺口上报
// ==========================================

pub mod backward_scheduler;
pub mod daily_capacity;
pub mod error;
pub mod forward_planner;
pub mod job_intake;
pub mod options;
pub mod orchestrator;
pub mod priority;
pub mod week_normalizer;
pub mod what_if;

// 重导出核心引擎
pub use backward_scheduler::BackwardScheduler;
pub use daily_capacity::DailyCapacityCalculator;
pub use error::{EngineError, EngineResult};
pub use forward_planner::ForwardPlanner;
pub use job_intake::{parse_calendar_date, select_schedulable_jobs, JobIntake};
pub use options::SchedulerOptions;
pub use orchestrator::CapacityPlanner;
pub use priority::JobPrioritySorter;
pub use week_normalizer::WeekScheduleNormalizer;
pub use what_if::WhatIfPlanner;
