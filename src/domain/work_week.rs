// ==========================================
// 人工排程引擎 - 工作周日历领域模型
// ==========================================
// 职责: 定义单日作息 (DaySchedule) 与整周作息 (WorkWeekSchedule)
// 约定: 星期索引 0=周日 .. 6=周六
// 红线: 未启用的工作日, 常规/加班工时恒为 0
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 一周天数
pub const DAYS_PER_WEEK: usize = 7;

// ==========================================
// 时间工具
// ==========================================

/// 解析时刻字符串（支持 `HH:MM` 与 `HH:MM:SS`）
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// 格式化时刻（秒为 0 时输出 `HH:MM`）
pub fn format_time_of_day(t: &NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

/// 两个时刻之间的小时数（end 早于 start 时为负）
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// 日期对应的星期索引（0=周日）
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

mod time_of_day {
    use super::{format_time_of_day, parse_time_of_day};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_time_of_day(t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("无效时刻: {}", raw)))
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// ==========================================
// DaySchedule - 单日作息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub enabled: bool, // 当天是否上班

    // ===== 常规时段 =====
    #[serde(with = "time_of_day")]
    pub standard_start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub standard_end: NaiveTime,
    pub unpaid_break_minutes: u32, // 无薪休息（从常规时段扣除）

    // ===== 加班时段（叠加于常规时段） =====
    pub overtime_enabled: bool,
    #[serde(with = "time_of_day")]
    pub overtime_start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub overtime_end: NaiveTime,
}

impl DaySchedule {
    /// 内置默认作息
    ///
    /// 周一至周五上班 08:00-17:00，午休 60 分钟（8 小时）；
    /// 周末休息；加班时段 17:00-19:00 默认关闭。
    pub fn default_for(weekday: usize) -> Self {
        Self {
            enabled: (1..=5).contains(&weekday),
            standard_start: hm(8, 0),
            standard_end: hm(17, 0),
            unpaid_break_minutes: 60,
            overtime_enabled: false,
            overtime_start: hm(17, 0),
            overtime_end: hm(19, 0),
        }
    }

    /// 常规时段分钟数（倒置时段按 0 计）
    pub fn standard_window_minutes(&self) -> u32 {
        let seconds = (self.standard_end - self.standard_start).num_seconds();
        if seconds <= 0 {
            0
        } else {
            (seconds / 60) as u32
        }
    }

    /// 单人常规工时（扣除无薪休息，下限 0）
    pub fn standard_hours(&self) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        let window = hours_between(self.standard_start, self.standard_end);
        (window - self.unpaid_break_minutes as f64 / 60.0).max(0.0)
    }

    /// 单人加班工时（未启用加班时为 0）
    pub fn overtime_hours(&self) -> f64 {
        if !self.enabled || !self.overtime_enabled {
            return 0.0;
        }
        hours_between(self.overtime_start, self.overtime_end).max(0.0)
    }

    /// 转回原始（宽松）表示
    pub fn to_raw(&self) -> RawDaySchedule {
        RawDaySchedule {
            enabled: Some(self.enabled),
            standard_start: Some(self.standard_start.format("%H:%M:%S").to_string()),
            standard_end: Some(self.standard_end.format("%H:%M:%S").to_string()),
            unpaid_break_minutes: Some(self.unpaid_break_minutes as i64),
            overtime_enabled: Some(self.overtime_enabled),
            overtime_start: Some(self.overtime_start.format("%H:%M:%S").to_string()),
            overtime_end: Some(self.overtime_end.format("%H:%M:%S").to_string()),
        }
    }
}

// ==========================================
// WorkWeekSchedule - 整周作息（7 天齐全）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkWeekSchedule {
    days: [DaySchedule; DAYS_PER_WEEK],
}

impl WorkWeekSchedule {
    /// 由 7 天作息构造（索引 0=周日）
    ///
    /// 注意: 不做修复，需要修复时请走 `WeekScheduleNormalizer`
    pub fn from_days(days: [DaySchedule; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn day_at(&self, index: usize) -> Option<&DaySchedule> {
        self.days.get(index)
    }

    /// 指定日期的作息
    pub fn for_date(&self, date: NaiveDate) -> &DaySchedule {
        &self.days[weekday_index(date)]
    }

    /// 是否至少有一天存在常规或加班工时
    pub fn has_any_capacity(&self, include_overtime: bool) -> bool {
        self.days.iter().any(|d| {
            d.standard_hours() > 0.0 || (include_overtime && d.overtime_hours() > 0.0)
        })
    }

    /// 转回原始映射（用于回写配置或幂等校验）
    pub fn to_raw(&self) -> RawWorkWeek {
        self.days
            .iter()
            .enumerate()
            .map(|(i, d)| (i as u8, d.to_raw()))
            .collect()
    }
}

impl Default for WorkWeekSchedule {
    fn default() -> Self {
        Self {
            days: std::array::from_fn(DaySchedule::default_for),
        }
    }
}

// ==========================================
// RawDaySchedule - 配置中读取的原始单日作息
// ==========================================
// 字段全部可选；时刻为字符串；休息分钟允许出现负数（由规范化修复）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDaySchedule {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub standard_start: Option<String>,
    #[serde(default)]
    pub standard_end: Option<String>,
    #[serde(default)]
    pub unpaid_break_minutes: Option<i64>,
    #[serde(default)]
    pub overtime_enabled: Option<bool>,
    #[serde(default)]
    pub overtime_start: Option<String>,
    #[serde(default)]
    pub overtime_end: Option<String>,
}

/// 原始整周作息：星期索引 → 单日作息（可缺项）
pub type RawWorkWeek = BTreeMap<u8, RawDaySchedule>;
