// ==========================================
// 人工排程引擎 - What-if 试算
// ==========================================
// 职责: 一次调用给出界面两个开关所需的全部正推结果
// - 开关1: 允许加班以求更早完工
// - 开关2: 目标交期可行性（分别关/开加班试算，差值即所需加班）
// ==========================================

use crate::domain::capacity::{CapacityParameters, DayUsageLedger};
use crate::domain::job::{WhatIfProjection, WhatIfToggles};
use crate::engine::error::EngineResult;
use crate::engine::forward_planner::ForwardPlanner;
use crate::engine::options::SchedulerOptions;
use chrono::NaiveDate;

pub struct WhatIfPlanner {
    planner: ForwardPlanner,
}

impl WhatIfPlanner {
    pub fn new() -> Self {
        Self {
            planner: ForwardPlanner::new(),
        }
    }

    /// 试算（`params.include_overtime` 被忽略，由开关决定）
    pub fn project(
        &self,
        required_hours: f64,
        from_date: NaiveDate,
        params: &CapacityParameters,
        ledger: &DayUsageLedger,
        toggles: WhatIfToggles,
        options: &SchedulerOptions,
    ) -> EngineResult<WhatIfProjection> {
        let regular = params.with_overtime(false);
        let with_overtime = params.with_overtime(true);

        let earliest_regular =
            self.planner
                .plan(required_hours, from_date, &regular, ledger, None, options)?;

        let earliest_with_overtime = if toggles.allow_overtime {
            Some(self.planner.plan(
                required_hours,
                from_date,
                &with_overtime,
                ledger,
                None,
                options,
            )?)
        } else {
            None
        };

        let (due_date_fit_regular, due_date_fit_with_overtime, overtime_needed_hours) =
            match toggles.target_due_date {
                Some(due) => {
                    let without = self.planner.plan(
                        required_hours,
                        from_date,
                        &regular,
                        ledger,
                        Some(due),
                        options,
                    )?;
                    let with = self.planner.plan(
                        required_hours,
                        from_date,
                        &with_overtime,
                        ledger,
                        Some(due),
                        options,
                    )?;
                    let needed = (without.remaining_hours - with.remaining_hours).max(0.0);
                    (Some(without), Some(with), Some(needed))
                }
                None => (None, None, None),
            };

        Ok(WhatIfProjection {
            earliest_regular,
            earliest_with_overtime,
            due_date_fit_regular,
            due_date_fit_with_overtime,
            overtime_needed_hours,
        })
    }
}

impl Default for WhatIfPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::work_week::{DaySchedule, WorkWeekSchedule};
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params() -> CapacityParameters {
        let days = std::array::from_fn(|weekday| {
            let mut day = DaySchedule::default_for(weekday);
            day.overtime_enabled = true;
            day.overtime_start = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
            day.overtime_end = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
            day
        });
        CapacityParameters::new(1, WorkWeekSchedule::from_days(days), false)
    }

    #[test]
    fn test_toggles_off_only_regular() {
        let what_if = WhatIfPlanner::new();
        let projection = what_if
            .project(
                16.0,
                date(2026, 1, 12),
                &params(),
                &DayUsageLedger::new(),
                WhatIfToggles::default(),
                &SchedulerOptions::default(),
            )
            .unwrap();

        assert_eq!(projection.earliest_regular.completion_date, Some(date(2026, 1, 13)));
        assert!(projection.earliest_with_overtime.is_none());
        assert!(projection.due_date_fit_regular.is_none());
        assert!(projection.overtime_needed_hours.is_none());
    }

    #[test]
    fn test_overtime_needed_for_target_date() {
        let what_if = WhatIfPlanner::new();
        let toggles = WhatIfToggles {
            allow_overtime: true,
            target_due_date: Some(date(2026, 1, 14)),
        };

        // 周一至周三: 常规 24，加班 6
        let projection = what_if
            .project(
                28.0,
                date(2026, 1, 12),
                &params(),
                &DayUsageLedger::new(),
                toggles,
                &SchedulerOptions::default(),
            )
            .unwrap();

        assert_eq!(projection.earliest_regular.completion_date, Some(date(2026, 1, 15)));
        let with_ot = projection.earliest_with_overtime.unwrap();
        assert_eq!(with_ot.completion_date, Some(date(2026, 1, 14)));
        assert_eq!(projection.due_date_fit_regular.unwrap().remaining_hours, 4.0);
        assert_eq!(projection.due_date_fit_with_overtime.unwrap().remaining_hours, 0.0);
        assert_eq!(projection.overtime_needed_hours, Some(4.0));
    }
}
