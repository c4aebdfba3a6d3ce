// ==========================================
// 人工排程引擎 - 单日产能计算
// ==========================================
// 职责: 某日“可能存在”的常规/加班产能（与台账无关）
// 口径: 产能 = 员工数 × 单人时段工时
// ==========================================

use crate::domain::capacity::{
    CapacityParameters, DailyCapacity, DayCapacitySlot, DayUsageLedger,
};
use chrono::NaiveDate;

// ==========================================
// DailyCapacityCalculator - 单日产能计算器
// ==========================================
pub struct DailyCapacityCalculator {
    // 无状态引擎，不需要注入依赖
}

impl DailyCapacityCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算单日产能
    ///
    /// # 规则
    /// - 当日未启用：常规/加班均为 0
    /// - 常规 = 员工数 × max(0, 时段小时 - 无薪休息/60)
    /// - 加班仅在 include_overtime 且当日启用加班时计入
    pub fn daily_capacity(&self, date: NaiveDate, params: &CapacityParameters) -> DailyCapacity {
        let day = params.work_week.for_date(date);
        if !day.enabled {
            return DailyCapacity::default();
        }

        let employees = params.employee_count as f64;
        let regular_capacity_hours = employees * day.standard_hours();
        let overtime_capacity_hours = if params.include_overtime {
            employees * day.overtime_hours()
        } else {
            0.0
        };

        DailyCapacity {
            regular_capacity_hours,
            overtime_capacity_hours,
        }
    }

    /// 组装产能槽（理论产能 + 台账已占用）
    pub fn slot(
        &self,
        date: NaiveDate,
        params: &CapacityParameters,
        ledger: &DayUsageLedger,
    ) -> DayCapacitySlot {
        DayCapacitySlot {
            date,
            capacity: self.daily_capacity(date, params),
            used: ledger.usage(date),
        }
    }
}

impl Default for DailyCapacityCalculator {
    fn default() -> Self {
        Self::new()
    }
}
