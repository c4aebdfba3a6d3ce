// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use labor_schedule::domain::job::JobScheduleInput;

/// 构造日期（测试用）
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// JobScheduleInput 构建器
// ==========================================

pub struct JobBuilder {
    id: String,
    due_date: NaiveDate,
    required_hours: f64,
    is_rush: bool,
}

impl JobBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            // 2026-01-16 为周五
            due_date: date(2026, 1, 16),
            required_hours: 8.0,
            is_rush: false,
        }
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.required_hours = hours;
        self
    }

    pub fn rush(mut self) -> Self {
        self.is_rush = true;
        self
    }

    pub fn build(self) -> JobScheduleInput {
        JobScheduleInput::new(self.id, self.due_date, self.required_hours, self.is_rush)
    }
}
