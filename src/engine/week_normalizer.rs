// ==========================================
// 人工排程引擎 - 工作周规范化
// ==========================================
// 职责: 补齐缺失的工作日配置，修复非法值
// 输入: 原始（可缺项、可含非法值）的整周作息
// 输出: 7 天齐全、内部一致的 WorkWeekSchedule
// 红线: 不报错；历史/残缺配置属于正常运行条件
// ==========================================

use crate::domain::work_week::{
    parse_time_of_day, DaySchedule, RawDaySchedule, RawWorkWeek, WorkWeekSchedule, DAYS_PER_WEEK,
};
use chrono::NaiveTime;
use tracing::debug;

// ==========================================
// WeekScheduleNormalizer - 工作周规范化
// ==========================================
pub struct WeekScheduleNormalizer {
    // 无状态引擎，不需要注入依赖
}

impl WeekScheduleNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 规范化整周作息
    ///
    /// 规则（逐日）：
    /// 1) 缺失的工作日使用内置默认作息
    /// 2) 缺失或格式错误的字段回退到该工作日的默认值
    /// 3) 常规时段倒置：保留原值（产能按 0 计），不改 enabled
    /// 4) 无薪休息钳制到 [0, 常规时段分钟数]
    /// 5) 加班时段倒置：强制 overtime_enabled = false
    pub fn normalize(&self, raw: &RawWorkWeek) -> WorkWeekSchedule {
        let days: [DaySchedule; DAYS_PER_WEEK] = std::array::from_fn(|weekday| {
            match raw.get(&(weekday as u8)) {
                Some(raw_day) => self.normalize_day(weekday, raw_day),
                None => DaySchedule::default_for(weekday),
            }
        });

        for key in raw.keys().filter(|k| **k as usize >= DAYS_PER_WEEK) {
            debug!(weekday_key = key, "忽略越界的星期索引");
        }

        WorkWeekSchedule::from_days(days)
    }

    /// 修复已有的整周作息（等价于对其原始表示再做一次规范化）
    pub fn repair(&self, schedule: &WorkWeekSchedule) -> WorkWeekSchedule {
        self.normalize(&schedule.to_raw())
    }

    /// 规范化单日
    pub fn normalize_day(&self, weekday: usize, raw: &RawDaySchedule) -> DaySchedule {
        let fallback = DaySchedule::default_for(weekday);

        let standard_start = time_or(&raw.standard_start, fallback.standard_start);
        let standard_end = time_or(&raw.standard_end, fallback.standard_end);
        let overtime_start = time_or(&raw.overtime_start, fallback.overtime_start);
        let overtime_end = time_or(&raw.overtime_end, fallback.overtime_end);

        let mut day = DaySchedule {
            enabled: raw.enabled.unwrap_or(fallback.enabled),
            standard_start,
            standard_end,
            unpaid_break_minutes: 0,
            overtime_enabled: raw.overtime_enabled.unwrap_or(fallback.overtime_enabled),
            overtime_start,
            overtime_end,
        };

        let window_minutes = day.standard_window_minutes() as i64;
        let requested_break = raw
            .unpaid_break_minutes
            .unwrap_or(fallback.unpaid_break_minutes as i64);
        day.unpaid_break_minutes = requested_break.clamp(0, window_minutes) as u32;

        if day.overtime_end <= day.overtime_start {
            day.overtime_enabled = false;
        }

        day
    }
}

impl Default for WeekScheduleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn time_or(raw: &Option<String>, fallback: NaiveTime) -> NaiveTime {
    match raw.as_deref() {
        Some(s) => match parse_time_of_day(s) {
            Some(t) => t,
            None => {
                debug!(raw_value = s, "时刻格式错误，使用默认值");
                fallback
            }
        },
        None => fallback,
    }
}
