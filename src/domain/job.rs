// ==========================================
// 人工排程引擎 - 作业与排程结果领域模型
// ==========================================
// 职责: 作业输入、逐日分配行、作业排程结果、正推试算结果
// 红线: 结果只描述本次计算，不携带持久化身份
// ==========================================

use crate::domain::capacity::{DayUsageLedger, HOURS_EPSILON};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RawJobRecord - 作业存储侧的原始行
// ==========================================
// 到期日为字符串 (YYYY-MM-DD)，工时可能缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobRecord {
    pub id: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub required_hours: Option<f64>,
    #[serde(default)]
    pub is_rush: Option<bool>,
}

// ==========================================
// JobScheduleInput - 待排作业
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleInput {
    pub id: String,
    pub due_date: NaiveDate,
    pub required_hours: f64,
    #[serde(default)]
    pub is_rush: bool,
}

impl JobScheduleInput {
    pub fn new(
        id: impl Into<String>,
        due_date: NaiveDate,
        required_hours: f64,
        is_rush: bool,
    ) -> Self {
        Self {
            id: id.into(),
            due_date,
            required_hours,
            is_rush,
        }
    }
}

// ==========================================
// ScheduleAllocation - 作业在某日的分配行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAllocation {
    pub date: NaiveDate,
    pub scheduled_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub capacity_hours: f64, // 当日理论总产能（供日历展示）
}

// ==========================================
// JobScheduleResult - 单作业倒排结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScheduleResult {
    pub id: String,
    pub due_date: NaiveDate,
    pub start_date: NaiveDate,
    pub required_hours: f64,
    pub overtime_hours: f64,
    pub unscheduled_hours: f64,
    pub allocations: Vec<ScheduleAllocation>, // 按日期升序
}

impl JobScheduleResult {
    /// 已落位工时
    pub fn scheduled_hours(&self) -> f64 {
        self.allocations.iter().map(|a| a.scheduled_hours).sum()
    }

    /// 是否按期全部落位
    pub fn is_fully_scheduled(&self) -> bool {
        self.unscheduled_hours <= HOURS_EPSILON
    }
}

// ==========================================
// CalendarEntry - 日历单元格中的一条作业
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub job_id: String,
    pub scheduled_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
}

// ==========================================
// BackwardScheduleOutput - 倒排输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackwardScheduleOutput {
    pub results: Vec<JobScheduleResult>, // 与输入顺序一致
    pub day_usage: DayUsageLedger,
}

impl BackwardScheduleOutput {
    /// 有缺口（未能按期落位）的作业
    pub fn at_risk_jobs(&self) -> Vec<&JobScheduleResult> {
        self.results
            .iter()
            .filter(|r| !r.is_fully_scheduled())
            .collect()
    }

    /// 全部缺口工时
    pub fn total_unscheduled_hours(&self) -> f64 {
        self.results.iter().map(|r| r.unscheduled_hours).sum()
    }

    /// 全部加班工时
    pub fn total_overtime_hours(&self) -> f64 {
        self.results.iter().map(|r| r.overtime_hours).sum()
    }

    /// 按 id 查找结果
    pub fn result_for(&self, job_id: &str) -> Option<&JobScheduleResult> {
        self.results.iter().find(|r| r.id == job_id)
    }

    /// 日历视图：日期 → 当日各作业分配（日期升序，日内按结果顺序）
    pub fn calendar(&self) -> BTreeMap<NaiveDate, Vec<CalendarEntry>> {
        let mut calendar: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
        for result in &self.results {
            for allocation in &result.allocations {
                calendar
                    .entry(allocation.date)
                    .or_default()
                    .push(CalendarEntry {
                        job_id: result.id.clone(),
                        scheduled_hours: allocation.scheduled_hours,
                        regular_hours: allocation.regular_hours,
                        overtime_hours: allocation.overtime_hours,
                    });
            }
        }
        calendar
    }
}

// ==========================================
// ForwardPlanResult - 正推试算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPlanResult {
    pub completion_date: Option<NaiveDate>, // None: 搜索窗口内无法完成
    pub overtime_hours: f64,
    pub remaining_hours: f64,
}

impl ForwardPlanResult {
    /// 是否可在窗口内完成
    pub fn is_feasible(&self) -> bool {
        self.remaining_hours <= HOURS_EPSILON
    }
}

// ==========================================
// What-if 试算
// ==========================================

/// 试算开关（对应界面上的两个独立开关）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfToggles {
    pub allow_overtime: bool,
    #[serde(default)]
    pub target_due_date: Option<NaiveDate>,
}

/// What-if 试算汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfProjection {
    pub earliest_regular: ForwardPlanResult,
    pub earliest_with_overtime: Option<ForwardPlanResult>,
    pub due_date_fit_regular: Option<ForwardPlanResult>,
    pub due_date_fit_with_overtime: Option<ForwardPlanResult>,
    pub overtime_needed_hours: Option<f64>, // 为赶上目标日期实际需要的加班
}
