// ==========================================
// 人工排程引擎 - 正推试算
// ==========================================
// 职责: 针对假设作业，基于既有占用台账计算最早完工日，
//       或在给定交期内判断产能是否足够、缺口与所需加班
// 红线: 只读台账，试算本身不占用任何产能
// ==========================================

use crate::domain::capacity::{
    CapacityConstraint, CapacityParameters, DayUsageLedger, HOURS_EPSILON,
};
use crate::domain::job::ForwardPlanResult;
use crate::engine::daily_capacity::DailyCapacityCalculator;
use crate::engine::error::{ensure_employee_count, ensure_positive_hours, EngineResult};
use crate::engine::options::SchedulerOptions;
use chrono::NaiveDate;
use tracing::{debug, instrument};

// ==========================================
// ForwardPlanner - 正推试算引擎
// ==========================================
pub struct ForwardPlanner {
    calculator: DailyCapacityCalculator,
}

impl ForwardPlanner {
    pub fn new() -> Self {
        Self {
            calculator: DailyCapacityCalculator::new(),
        }
    }

    /// 正推试算
    ///
    /// # 参数
    /// - `required_hours`: 假设作业所需工时（> 0）
    /// - `from_date`: 起算日（含）
    /// - `ledger`: 既有占用（只读）
    /// - `due_date`: None 时求最早完工日；Some 时判断 [from_date, due_date] 内是否够用
    #[instrument(skip(self, params, ledger, options), fields(
        employee_count = params.employee_count,
        include_overtime = params.include_overtime
    ))]
    pub fn plan(
        &self,
        required_hours: f64,
        from_date: NaiveDate,
        params: &CapacityParameters,
        ledger: &DayUsageLedger,
        due_date: Option<NaiveDate>,
        options: &SchedulerOptions,
    ) -> EngineResult<ForwardPlanResult> {
        ensure_positive_hours("required_hours", required_hours)?;
        ensure_employee_count(params.employee_count)?;

        let result = match due_date {
            None => self.plan_earliest(required_hours, from_date, params, ledger, options),
            Some(due) => {
                self.plan_until(required_hours, from_date, due, params, ledger, options)
            }
        };

        debug!(
            completion_date = ?result.completion_date,
            overtime_hours = result.overtime_hours,
            remaining_hours = result.remaining_hours,
            "正推试算完成"
        );
        Ok(result)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 最早完工日：逐日向后，先常规后加班
    fn plan_earliest(
        &self,
        required_hours: f64,
        from_date: NaiveDate,
        params: &CapacityParameters,
        ledger: &DayUsageLedger,
        options: &SchedulerOptions,
    ) -> ForwardPlanResult {
        let mut remaining = required_hours;
        let mut overtime_hours = 0.0;
        let mut cursor = Some(from_date);
        let walkable = params.work_week.has_any_capacity(params.include_overtime);

        for _ in 0..=options.forward_horizon_days {
            let date = match cursor {
                Some(d) if walkable => d,
                _ => break,
            };
            cursor = date.succ_opt();

            let slot = self.calculator.slot(date, params, ledger);
            let (regular, overtime) = slot.take(remaining);
            remaining -= regular + overtime;
            overtime_hours += overtime;

            if remaining <= HOURS_EPSILON {
                return ForwardPlanResult {
                    completion_date: Some(date),
                    overtime_hours,
                    remaining_hours: 0.0,
                };
            }
        }

        ForwardPlanResult {
            completion_date: None,
            overtime_hours,
            remaining_hours: remaining,
        }
    }

    /// 交期可行性：汇总 [from_date, due_date] 内的剩余产能
    ///
    /// 窗口同样受 forward_horizon_days 限制，超出部分不计入可用产能
    /// - overtime_hours: 满足需求所需的最少加班（常规不足部分，受加班产能上限约束）
    /// - completion_date: 累计可用产能首次覆盖需求的日期
    fn plan_until(
        &self,
        required_hours: f64,
        from_date: NaiveDate,
        due_date: NaiveDate,
        params: &CapacityParameters,
        ledger: &DayUsageLedger,
        options: &SchedulerOptions,
    ) -> ForwardPlanResult {
        let mut regular_total = 0.0;
        let mut overtime_total = 0.0;
        let mut completion_date = None;
        let mut cursor = Some(from_date);

        for _ in 0..=options.forward_horizon_days {
            let date = match cursor {
                Some(d) if d <= due_date => d,
                _ => break,
            };
            cursor = date.succ_opt();

            let slot = self.calculator.slot(date, params, ledger);
            regular_total += slot.remaining_regular_hours();
            overtime_total += slot.remaining_overtime_hours();

            if completion_date.is_none()
                && regular_total + overtime_total + HOURS_EPSILON >= required_hours
            {
                completion_date = Some(date);
            }
            // 常规已够用时，后续日期不会改变结果
            if regular_total + HOURS_EPSILON >= required_hours {
                break;
            }
        }

        let regular_shortfall = (required_hours - regular_total).max(0.0);
        let overtime_hours = regular_shortfall.min(overtime_total);
        let remaining = regular_shortfall - overtime_hours;

        ForwardPlanResult {
            completion_date,
            overtime_hours,
            remaining_hours: if remaining <= HOURS_EPSILON { 0.0 } else { remaining },
        }
    }
}

impl Default for ForwardPlanner {
    fn default() -> Self {
        Self::new()
    }
}
