// ==========================================
// 人工排程引擎 - 核心库
// ==========================================
// 职责: 按工作周作息与员工数计算每日工时产能，
//       以交期倒排作业，并为假设作业正推最早完工日
// 系统定位: 决策支持 (结果供人工调整，不落库)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 作息/产能/作业
pub mod domain;

// 引擎层 - 规范化/产能/倒排/正推
pub mod engine;

// 配置层 - 组织级配置读取
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    BackwardScheduleOutput, CapacityParameters, DailyCapacity, DaySchedule, DayUsage,
    DayUsageLedger, ForwardPlanResult, JobScheduleInput, JobScheduleResult, RawDaySchedule,
    RawJobRecord, RawWorkWeek, ScheduleAllocation, WhatIfProjection, WhatIfToggles,
    WorkWeekSchedule,
};

// 引擎
pub use engine::{
    BackwardScheduler, CapacityPlanner, DailyCapacityCalculator, EngineError, EngineResult,
    ForwardPlanner, JobPrioritySorter, SchedulerOptions, WeekScheduleNormalizer, WhatIfPlanner,
};

// 配置
pub use config::{ConfigManager, ScheduleConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "人工排程引擎";
