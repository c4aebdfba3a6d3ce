// ==========================================
// 人工排程引擎 - 作业准入
// ==========================================
// 职责: 将作业存储侧的原始行转换为待排作业
// 规则:
// - 缺交期 / 工时缺失或非正数：剔除，并给出原因
// - 交期存在但格式错误：视为调用方缺陷，返回 InvalidInput
// ==========================================

use crate::domain::job::{JobScheduleInput, RawJobRecord};
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::Serialize;

/// 剔除原因: 缺交期
pub const REASON_MISSING_DUE_DATE: &str = "MISSING_DUE_DATE";

/// 剔除原因: 工时缺失或非正数
pub const REASON_NON_POSITIVE_HOURS: &str = "NON_POSITIVE_HOURS";

/// 准入结果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIntake {
    pub jobs: Vec<JobScheduleInput>,
    pub excluded: Vec<(String, &'static str)>, // (作业 id, 剔除原因)
}

/// 解析日历日期（YYYY-MM-DD）
pub fn parse_calendar_date(raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| EngineError::invalid_input(format!("日期格式错误 '{}': {}", raw, e)))
}

/// 筛选可排作业（保持输入顺序）
pub fn select_schedulable_jobs(records: &[RawJobRecord]) -> EngineResult<JobIntake> {
    let mut intake = JobIntake::default();

    for record in records {
        let due_raw = match record.due_date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => {
                intake.excluded.push((record.id.clone(), REASON_MISSING_DUE_DATE));
                continue;
            }
        };
        let due_date = parse_calendar_date(due_raw)?;

        let required_hours = match record.required_hours {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => {
                intake.excluded.push((record.id.clone(), REASON_NON_POSITIVE_HOURS));
                continue;
            }
        };

        intake.jobs.push(JobScheduleInput {
            id: record.id.clone(),
            due_date,
            required_hours,
            is_rush: record.is_rush.unwrap_or(false),
        });
    }

    Ok(intake)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, due: Option<&str>, hours: Option<f64>, rush: Option<bool>) -> RawJobRecord {
        RawJobRecord {
            id: id.to_string(),
            due_date: due.map(str::to_string),
            required_hours: hours,
            is_rush: rush,
        }
    }

    #[test]
    fn test_select_filters_and_keeps_order() {
        let records = vec![
            record("A", Some("2026-01-16"), Some(8.0), Some(true)),
            record("B", None, Some(8.0), None),
            record("C", Some("2026-01-20"), Some(0.0), None),
            record("D", Some(" 2026-01-09 "), Some(2.5), None),
            record("E", Some(""), Some(4.0), None),
            record("F", Some("2026-01-21"), None, None),
        ];

        let intake = select_schedulable_jobs(&records).unwrap();
        let ids: Vec<&str> = intake.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "D"]);
        assert!(intake.jobs[0].is_rush);
        assert!(!intake.jobs[1].is_rush);
        assert_eq!(
            intake.excluded,
            vec![
                ("B".to_string(), REASON_MISSING_DUE_DATE),
                ("C".to_string(), REASON_NON_POSITIVE_HOURS),
                ("E".to_string(), REASON_MISSING_DUE_DATE),
                ("F".to_string(), REASON_NON_POSITIVE_HOURS),
            ]
        );
    }

    #[test]
    fn test_malformed_date_is_invalid_input() {
        let records = vec![record("A", Some("16/01/2026"), Some(8.0), None)];
        let err = select_schedulable_jobs(&records).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(parse_calendar_date("2026-02-30").is_err());
    }
}
