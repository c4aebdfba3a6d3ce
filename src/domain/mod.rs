// ==========================================
// 人工排程引擎 - 领域模型层
// ==========================================
// 职责: 定义作息、产能、作业与排程结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod capacity;
pub mod job;
pub mod work_week;

// 重导出核心类型
pub use capacity::{
    CapacityConstraint, CapacityParameters, DailyCapacity, DayCapacitySlot, DayUsage,
    DayUsageLedger, HOURS_EPSILON,
};
pub use job::{
    BackwardScheduleOutput, CalendarEntry, ForwardPlanResult, JobScheduleInput,
    JobScheduleResult, RawJobRecord, ScheduleAllocation, WhatIfProjection, WhatIfToggles,
};
pub use work_week::{DaySchedule, RawDaySchedule, RawWorkWeek, WorkWeekSchedule};
