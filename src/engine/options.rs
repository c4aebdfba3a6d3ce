// ==========================================
// 人工排程引擎 - 排程选项
// ==========================================
// 职责: 倒排/正推的搜索窗口（安全上限）与日期下限
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 默认倒排窗口（自交期向前的天数）
pub const DEFAULT_BACKWARD_HORIZON_DAYS: u32 = 365;

/// 默认正推窗口（自起算日向后的天数）
pub const DEFAULT_FORWARD_HORIZON_DAYS: u32 = 365;

/// 排程选项
///
/// 窗口语义: 访问起点当天，再加上最多 `*_horizon_days` 个日历日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerOptions {
    #[serde(default = "default_backward_horizon")]
    pub backward_horizon_days: u32,
    #[serde(default = "default_forward_horizon")]
    pub forward_horizon_days: u32,
    /// 倒排不落位于此日期之前（None 表示仅受窗口限制）
    #[serde(default)]
    pub not_before: Option<NaiveDate>,
}

fn default_backward_horizon() -> u32 {
    DEFAULT_BACKWARD_HORIZON_DAYS
}

fn default_forward_horizon() -> u32 {
    DEFAULT_FORWARD_HORIZON_DAYS
}

impl SchedulerOptions {
    pub fn with_backward_horizon(mut self, days: u32) -> Self {
        self.backward_horizon_days = days;
        self
    }

    pub fn with_forward_horizon(mut self, days: u32) -> Self {
        self.forward_horizon_days = days;
        self
    }

    pub fn with_not_before(mut self, date: Option<NaiveDate>) -> Self {
        self.not_before = date;
        self
    }
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            backward_horizon_days: DEFAULT_BACKWARD_HORIZON_DAYS,
            forward_horizon_days: DEFAULT_FORWARD_HORIZON_DAYS,
            not_before: None,
        }
    }
}
