// ==========================================
// 人工排程引擎 - 倒排引擎
// ==========================================
// 职责: 自交期向前逐日分配作业工时，共享每日产能
// 输入: 作业列表 + 产能参数 + 排程选项
// 输出: 逐作业分配结果 + 占用台账
// 红线: 先常规后加班；不落位于交期之后；产能不足以缺口上报而非报错
// ==========================================

use crate::domain::capacity::{CapacityParameters, DayUsageLedger, HOURS_EPSILON};
use crate::domain::job::{
    BackwardScheduleOutput, JobScheduleInput, JobScheduleResult, ScheduleAllocation,
};
use crate::engine::daily_capacity::DailyCapacityCalculator;
use crate::engine::error::{ensure_employee_count, ensure_positive_hours, EngineResult};
use crate::engine::options::SchedulerOptions;
use crate::engine::priority::JobPrioritySorter;
use tracing::{debug, info, instrument};

// ==========================================
// BackwardScheduler - 倒排引擎
// ==========================================
pub struct BackwardScheduler {
    sorter: JobPrioritySorter,
    calculator: DailyCapacityCalculator,
}

impl BackwardScheduler {
    pub fn new() -> Self {
        Self {
            sorter: JobPrioritySorter::new(),
            calculator: DailyCapacityCalculator::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 倒排一批作业（使用全新台账）
    ///
    /// # 返回
    /// 结果按输入顺序排列；台账为本次全部作业的累计占用
    pub fn schedule(
        &self,
        jobs: &[JobScheduleInput],
        params: &CapacityParameters,
        options: &SchedulerOptions,
    ) -> EngineResult<BackwardScheduleOutput> {
        let mut day_usage = DayUsageLedger::new();
        let results = self.schedule_onto(jobs, params, options, &mut day_usage)?;
        Ok(BackwardScheduleOutput { results, day_usage })
    }

    /// 在已有台账之上倒排（台账会被累加）
    ///
    /// 处理顺序见 `JobPrioritySorter`；校验失败时台账保持不变。
    #[instrument(skip(self, jobs, params, options, ledger), fields(
        jobs_count = jobs.len(),
        employee_count = params.employee_count,
        include_overtime = params.include_overtime,
        horizon_days = options.backward_horizon_days
    ))]
    pub fn schedule_onto(
        &self,
        jobs: &[JobScheduleInput],
        params: &CapacityParameters,
        options: &SchedulerOptions,
        ledger: &mut DayUsageLedger,
    ) -> EngineResult<Vec<JobScheduleResult>> {
        ensure_employee_count(params.employee_count)?;
        for job in jobs {
            ensure_positive_hours(&format!("job[{}].required_hours", job.id), job.required_hours)?;
        }

        let mut slots: Vec<Option<JobScheduleResult>> = vec![None; jobs.len()];
        for index in self.sorter.sorted_indices(jobs) {
            let result = self.schedule_job(&jobs[index], params, options, ledger);
            debug!(
                job_id = %result.id,
                due_date = %result.due_date,
                start_date = %result.start_date,
                allocated_days = result.allocations.len(),
                overtime_hours = result.overtime_hours,
                unscheduled_hours = result.unscheduled_hours,
                "作业倒排完成"
            );
            slots[index] = Some(result);
        }

        let results: Vec<JobScheduleResult> = slots.into_iter().flatten().collect();

        let at_risk = results.iter().filter(|r| !r.is_fully_scheduled()).count();
        info!(
            scheduled_jobs = results.len(),
            at_risk_jobs = at_risk,
            ledger_days = ledger.len(),
            "倒排完成"
        );

        Ok(results)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 单作业倒排：自交期逐日向前，直到需求满足或越过窗口/下限
    fn schedule_job(
        &self,
        job: &JobScheduleInput,
        params: &CapacityParameters,
        options: &SchedulerOptions,
        ledger: &mut DayUsageLedger,
    ) -> JobScheduleResult {
        let mut unmet = job.required_hours;
        let mut allocations = Vec::new();
        let mut cursor = Some(job.due_date);
        // 整周无产能时不必走完窗口
        let walkable = params.work_week.has_any_capacity(params.include_overtime);

        for _ in 0..=options.backward_horizon_days {
            if !walkable || unmet <= HOURS_EPSILON {
                break;
            }
            let date = match cursor {
                Some(d) => d,
                None => break,
            };
            if options.not_before.map_or(false, |floor| date < floor) {
                break;
            }
            cursor = date.pred_opt();

            let slot = self.calculator.slot(date, params, ledger);
            let (regular, overtime) = slot.take(unmet);
            let scheduled = regular + overtime;
            if scheduled <= HOURS_EPSILON {
                continue;
            }

            ledger.record(date, regular, overtime);
            allocations.push(ScheduleAllocation {
                date,
                scheduled_hours: scheduled,
                regular_hours: regular,
                overtime_hours: overtime,
                capacity_hours: slot.capacity.total_hours(),
            });
            unmet -= scheduled;
        }

        // 倒序走访，翻转为日期升序
        allocations.reverse();

        let unscheduled_hours = if unmet <= HOURS_EPSILON { 0.0 } else { unmet };
        let start_date = allocations.first().map(|a| a.date).unwrap_or(job.due_date);
        let overtime_hours = allocations.iter().map(|a| a.overtime_hours).sum();

        JobScheduleResult {
            id: job.id.clone(),
            due_date: job.due_date,
            start_date,
            required_hours: job.required_hours,
            overtime_hours,
            unscheduled_hours,
            allocations,
        }
    }
}

impl Default for BackwardScheduler {
    fn default() -> Self {
        Self::new()
    }
}
