// ==========================================
// 人工排程引擎 - 配置管理器
// ==========================================
// 职责: 读取组织级排程配置（工作周、员工数、排程窗口）
// 存储: config_kv 表 (scope_id + key → value)，scope_id='global'
// 口径: 配置值缺失或格式错误时回退默认值并告警，不中断排程
// ==========================================

use crate::config::schedule_config_trait::ScheduleConfigReader;
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::domain::work_week::{RawDaySchedule, RawWorkWeek};
use crate::engine::options::{
    SchedulerOptions, DEFAULT_BACKWARD_HORIZON_DAYS, DEFAULT_FORWARD_HORIZON_DAYS,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
            ensure_config_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// # 用途
    /// - 与排程结果一并留档，保证试算可复现
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key",
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 读取天数类配置（非负整数）
    fn get_days_or_default(&self, key: &str, default: u32) -> Result<u32, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        Ok(value.trim().parse::<u32>().unwrap_or_else(|_| {
            tracing::warn!(config_key = key, raw_value = %value, "天数配置格式错误，使用默认值");
            default
        }))
    }
}

// ==========================================
// 工作周 JSON 解析
// ==========================================

/// 解析工作周配置（逐日宽松解析）
///
/// 格式: {"1": {"enabled": true, "standardStart": "08:00", ...}, ...}
/// - 整体不是 JSON 对象：告警并返回空映射
/// - 键不是 0-255 的整数或单日结构错误：告警并跳过该日（由规范化补默认）
pub fn parse_work_week_json(raw: &str) -> RawWorkWeek {
    let mut week = RawWorkWeek::new();

    let object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => {
            tracing::warn!(raw_value = %raw, "工作周配置不是 JSON 对象，使用默认工作周");
            return week;
        }
    };

    for (key, value) in object {
        let weekday = match key.trim().parse::<u8>() {
            Ok(k) => k,
            Err(_) => {
                tracing::warn!(weekday_key = %key, "工作周配置键不是星期索引，已忽略");
                continue;
            }
        };
        match serde_json::from_value::<RawDaySchedule>(value) {
            Ok(day) => {
                week.insert(weekday, day);
            }
            Err(e) => {
                tracing::warn!(weekday = weekday, error = %e, "单日作息配置格式错误，使用默认值");
            }
        }
    }

    week
}

// ==========================================
// ScheduleConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ScheduleConfigReader for ConfigManager {
    async fn get_work_week_schedule(&self) -> Result<RawWorkWeek, Box<dyn Error>> {
        match self.get_config_value(config_keys::WORK_WEEK_SCHEDULE)? {
            Some(raw) => Ok(parse_work_week_json(&raw)),
            None => Ok(RawWorkWeek::new()),
        }
    }

    async fn get_employee_count(&self) -> Result<u32, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::EMPLOYEE_COUNT, "1")?;
        match value.trim().parse::<i64>() {
            // 负数按 0 处理，交由引擎按非法输入拒绝
            Ok(n) => Ok(n.clamp(0, u32::MAX as i64) as u32),
            Err(_) => {
                tracing::warn!(raw_value = %value, "员工数配置格式错误，使用默认值 1");
                Ok(1)
            }
        }
    }

    async fn get_scheduler_options(&self) -> Result<SchedulerOptions, Box<dyn Error>> {
        let backward = self.get_days_or_default(
            config_keys::BACKWARD_HORIZON_DAYS,
            DEFAULT_BACKWARD_HORIZON_DAYS,
        )?;
        let forward = self.get_days_or_default(
            config_keys::FORWARD_HORIZON_DAYS,
            DEFAULT_FORWARD_HORIZON_DAYS,
        )?;

        let not_before = match self.get_config_value(config_keys::SCHEDULE_NOT_BEFORE)? {
            Some(raw) if !raw.trim().is_empty() => {
                match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(_) => {
                        tracing::warn!(raw_value = %raw, "排程日期下限格式错误，已忽略");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(SchedulerOptions::default()
            .with_backward_horizon(backward)
            .with_forward_horizon(forward)
            .with_not_before(not_before))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 工作周作息 (JSON)
    pub const WORK_WEEK_SCHEDULE: &str = "work_week_schedule";

    // 员工数
    pub const EMPLOYEE_COUNT: &str = "employee_count";

    // 排程窗口
    pub const BACKWARD_HORIZON_DAYS: &str = "backward_horizon_days";
    pub const FORWARD_HORIZON_DAYS: &str = "forward_horizon_days";
    pub const SCHEDULE_NOT_BEFORE: &str = "schedule_not_before";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_work_week_json_lenient() {
        let week = parse_work_week_json(
            r#"{
                "1": {"enabled": true, "standardStart": "07:00", "standardEnd": "15:30", "unpaidBreakMinutes": 30},
                "2": {"enabled": "yes"},
                "monday": {"enabled": true},
                "6": {"enabled": true, "overtimeEnabled": true}
            }"#,
        );

        assert_eq!(week.len(), 2);
        assert_eq!(week[&1].standard_start.as_deref(), Some("07:00"));
        assert_eq!(week[&1].unpaid_break_minutes, Some(30));
        assert_eq!(week[&6].overtime_enabled, Some(true));
        assert!(!week.contains_key(&2));
    }

    #[test]
    fn test_parse_work_week_json_not_object() {
        assert!(parse_work_week_json("[1,2,3]").is_empty());
        assert!(parse_work_week_json("not json").is_empty());
    }
}
