// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use labor_schedule::config::ScheduleConfigReader;
use labor_schedule::domain::work_week::{RawDaySchedule, RawWorkWeek};
use labor_schedule::engine::SchedulerOptions;
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub work_week: RawWorkWeek,
    pub employee_count: u32,
    pub options: SchedulerOptions,
}

impl MockConfig {
    /// 创建默认配置（空工作周 → 默认周一至周五 8 小时，1 人）
    pub fn default() -> Self {
        Self {
            work_week: RawWorkWeek::new(),
            employee_count: 1,
            options: SchedulerOptions::default(),
        }
    }

    /// 指定员工数
    pub fn with_employees(employee_count: u32) -> Self {
        let mut config = Self::default();
        config.employee_count = employee_count;
        config
    }

    /// 工作日开放 17:00-19:00 加班
    pub fn with_weekday_overtime() -> Self {
        let mut config = Self::default();
        for weekday in 1..=5u8 {
            config.work_week.insert(
                weekday,
                RawDaySchedule {
                    enabled: Some(true),
                    overtime_enabled: Some(true),
                    overtime_start: Some("17:00".to_string()),
                    overtime_end: Some("19:00".to_string()),
                    ..RawDaySchedule::default()
                },
            );
        }
        config
    }

    /// 设置排程选项
    pub fn options(mut self, options: SchedulerOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl ScheduleConfigReader for MockConfig {
    async fn get_work_week_schedule(&self) -> Result<RawWorkWeek, Box<dyn Error>> {
        Ok(self.work_week.clone())
    }

    async fn get_employee_count(&self) -> Result<u32, Box<dyn Error>> {
        Ok(self.employee_count)
    }

    async fn get_scheduler_options(&self) -> Result<SchedulerOptions, Box<dyn Error>> {
        Ok(self.options)
    }
}
