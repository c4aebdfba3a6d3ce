// ==========================================
// 人工排程引擎 - 产能领域模型
// ==========================================
// 职责: 产能参数、单日产能、单日占用与占用台账
// 红线: 常规与加班两个产能池独立核算, 互不挪用
// ==========================================

use crate::domain::work_week::WorkWeekSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 工时比较容差（小于该值视为 0）
pub const HOURS_EPSILON: f64 = 1e-9;

// ==========================================
// CapacityParameters - 产能参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityParameters {
    pub employee_count: u32,         // 员工数（全周统一）
    pub work_week: WorkWeekSchedule, // 已规范化的整周作息
    #[serde(default)]
    pub include_overtime: bool, // 查询期开关，不落库
}

impl CapacityParameters {
    pub fn new(employee_count: u32, work_week: WorkWeekSchedule, include_overtime: bool) -> Self {
        Self {
            employee_count,
            work_week,
            include_overtime,
        }
    }

    /// 复制一份并切换加班开关（试算时常用）
    pub fn with_overtime(&self, include_overtime: bool) -> Self {
        Self {
            include_overtime,
            ..self.clone()
        }
    }
}

// ==========================================
// DailyCapacity - 单日理论产能
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCapacity {
    pub regular_capacity_hours: f64,
    pub overtime_capacity_hours: f64,
}

impl DailyCapacity {
    pub fn total_hours(&self) -> f64 {
        self.regular_capacity_hours + self.overtime_capacity_hours
    }
}

// ==========================================
// DayUsage - 单日已占用工时
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayUsage {
    pub regular_hours: f64,
    pub overtime_hours: f64,
}

impl DayUsage {
    pub fn total_hours(&self) -> f64 {
        self.regular_hours + self.overtime_hours
    }
}

// ==========================================
// DayUsageLedger - 占用台账（日期 → 已占用）
// ==========================================
// 由调用方持有并显式传递；引擎内部不保留任何跨调用状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayUsageLedger {
    entries: BTreeMap<NaiveDate, DayUsage>,
}

impl DayUsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询某日占用（无记录时为 0）
    pub fn usage(&self, date: NaiveDate) -> DayUsage {
        self.entries.get(&date).copied().unwrap_or_default()
    }

    /// 累加某日占用
    pub fn record(&mut self, date: NaiveDate, regular_hours: f64, overtime_hours: f64) {
        let entry = self.entries.entry(date).or_default();
        entry.regular_hours += regular_hours;
        entry.overtime_hours += overtime_hours;
    }

    /// 合并另一份台账（并行试算后由调用方合并）
    pub fn merge(&mut self, other: &DayUsageLedger) {
        for (date, usage) in other.iter() {
            self.record(*date, usage.regular_hours, usage.overtime_hours);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayUsage)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 台账内全部已占用工时
    pub fn total_hours(&self) -> f64 {
        self.entries.values().map(DayUsage::total_hours).sum()
    }
}

// ==========================================
// DayCapacitySlot - 单日产能槽（理论产能 + 已占用）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCapacitySlot {
    pub date: NaiveDate,
    pub capacity: DailyCapacity,
    pub used: DayUsage,
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 倒排/正推共用的剩余产能口径
pub trait CapacityConstraint {
    /// 剩余常规产能
    fn remaining_regular_hours(&self) -> f64;

    /// 剩余加班产能
    fn remaining_overtime_hours(&self) -> f64;

    /// 剩余总产能
    fn remaining_total_hours(&self) -> f64 {
        self.remaining_regular_hours() + self.remaining_overtime_hours()
    }

    /// 是否已无可用产能
    fn is_exhausted(&self) -> bool {
        self.remaining_total_hours() <= HOURS_EPSILON
    }
}

impl CapacityConstraint for DayCapacitySlot {
    fn remaining_regular_hours(&self) -> f64 {
        (self.capacity.regular_capacity_hours - self.used.regular_hours).max(0.0)
    }

    fn remaining_overtime_hours(&self) -> f64 {
        (self.capacity.overtime_capacity_hours - self.used.overtime_hours).max(0.0)
    }
}

impl DayCapacitySlot {
    /// 按“先常规、后加班”在本槽内分配
    ///
    /// # 返回
    /// (常规工时, 加班工时)，两者之和不超过 `wanted_hours`
    pub fn take(&self, wanted_hours: f64) -> (f64, f64) {
        if wanted_hours <= HOURS_EPSILON {
            return (0.0, 0.0);
        }
        let regular = wanted_hours.min(self.remaining_regular_hours());
        let overtime = (wanted_hours - regular).min(self.remaining_overtime_hours()).max(0.0);
        (regular, overtime)
    }
}
