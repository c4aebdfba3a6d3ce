// ==========================================
// 人工排程引擎 - 引擎编排器
// ==========================================
// 用途: 从配置读取作息/员工数/窗口，组装产能参数后调用倒排与试算
// 流程: 读取配置 → 作息规范化 → 校验员工数 → 倒排 / What-if
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::capacity::{CapacityParameters, DayUsageLedger};
use crate::domain::job::{
    BackwardScheduleOutput, JobScheduleInput, WhatIfProjection, WhatIfToggles,
};
use crate::engine::error::ensure_employee_count;
use crate::engine::options::SchedulerOptions;
use crate::engine::{BackwardScheduler, WeekScheduleNormalizer, WhatIfPlanner};
use chrono::NaiveDate;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// CapacityPlanner - 引擎编排器
// ==========================================

pub struct CapacityPlanner<C>
where
    C: ScheduleConfigReader,
{
    config: Arc<C>,
    not_before_override: Option<NaiveDate>,
    normalizer: WeekScheduleNormalizer,
    scheduler: BackwardScheduler,
    what_if: WhatIfPlanner,
}

impl<C> CapacityPlanner<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            not_before_override: None,
            normalizer: WeekScheduleNormalizer::new(),
            scheduler: BackwardScheduler::new(),
            what_if: WhatIfPlanner::new(),
        }
    }

    /// 覆盖配置中的排程日期下限（通常传入今天，避免落位到过去）
    pub fn with_not_before(mut self, not_before: Option<NaiveDate>) -> Self {
        self.not_before_override = not_before;
        self
    }

    /// 读取配置并组装产能参数
    ///
    /// 作息经规范化后必然可用；员工数 < 1 返回 InvalidInput
    pub async fn load_parameters(
        &self,
        include_overtime: bool,
    ) -> Result<CapacityParameters, Box<dyn Error>> {
        let raw_week = self.config.get_work_week_schedule().await?;
        let work_week = self.normalizer.normalize(&raw_week);
        let employee_count = self.config.get_employee_count().await?;
        ensure_employee_count(employee_count)?;

        debug!(
            configured_days = raw_week.len(),
            employee_count = employee_count,
            include_overtime = include_overtime,
            "产能参数已加载"
        );

        Ok(CapacityParameters::new(
            employee_count,
            work_week,
            include_overtime,
        ))
    }

    /// 读取排程选项（日期下限以覆盖值优先）
    pub async fn load_options(&self) -> Result<SchedulerOptions, Box<dyn Error>> {
        let options = self.config.get_scheduler_options().await?;
        match self.not_before_override {
            Some(floor) => Ok(options.with_not_before(Some(floor))),
            None => Ok(options),
        }
    }

    /// 倒排一批作业
    pub async fn schedule_jobs(
        &self,
        jobs: &[JobScheduleInput],
        include_overtime: bool,
    ) -> Result<BackwardScheduleOutput, Box<dyn Error>> {
        info!(
            jobs_count = jobs.len(),
            include_overtime = include_overtime,
            "开始执行倒排流程"
        );

        let params = self.load_parameters(include_overtime).await?;
        let options = self.load_options().await?;

        let output = self.scheduler.schedule(jobs, &params, &options)?;

        info!(
            jobs_count = output.results.len(),
            at_risk_count = output.at_risk_jobs().len(),
            total_unscheduled_hours = output.total_unscheduled_hours(),
            total_overtime_hours = output.total_overtime_hours(),
            "倒排流程完成"
        );

        Ok(output)
    }

    /// What-if 试算（基于已有占用台账）
    pub async fn what_if(
        &self,
        required_hours: f64,
        from_date: NaiveDate,
        ledger: &DayUsageLedger,
        toggles: WhatIfToggles,
    ) -> Result<WhatIfProjection, Box<dyn Error>> {
        let params = self.load_parameters(false).await?;
        let options = self.load_options().await?;

        let projection =
            self.what_if
                .project(required_hours, from_date, &params, ledger, toggles, &options)?;

        info!(
            required_hours = required_hours,
            from_date = %from_date,
            earliest_regular = ?projection.earliest_regular.completion_date,
            earliest_with_overtime = ?projection
                .earliest_with_overtime
                .as_ref()
                .and_then(|r| r.completion_date),
            overtime_needed_hours = ?projection.overtime_needed_hours,
            "What-if 试算完成"
        );

        Ok(projection)
    }
}
