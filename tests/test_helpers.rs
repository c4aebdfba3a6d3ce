// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的配置库初始化与配置写入
// ==========================================

#![allow(dead_code)]

use labor_schedule::db::ensure_config_schema;
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 config_kv 表
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    ensure_config_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(Connection::open(db_path)?)
}

/// 写入一条 global 配置（存在则覆盖）
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO config_kv (scope_id, key, value)
        VALUES ('global', ?1, ?2)
        ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value
        "#,
        params![key, value],
    )?;
    Ok(())
}

/// 写入一套典型配置: 3 人，周六上午班，工作日开放 17:00-19:00 加班
pub fn insert_test_config(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let week = r#"{
        "1": {"enabled": true, "standardStart": "08:00", "standardEnd": "17:00", "unpaidBreakMinutes": 60,
              "overtimeEnabled": true, "overtimeStart": "17:00", "overtimeEnd": "19:00"},
        "2": {"enabled": true, "overtimeEnabled": true},
        "3": {"enabled": true, "overtimeEnabled": true},
        "4": {"enabled": true, "overtimeEnabled": true},
        "5": {"enabled": true, "overtimeEnabled": true},
        "6": {"enabled": true, "standardStart": "08:00", "standardEnd": "12:00", "unpaidBreakMinutes": 0}
    }"#;

    insert_config(conn, "work_week_schedule", week)?;
    insert_config(conn, "employee_count", "3")?;
    insert_config(conn, "backward_horizon_days", "30")?;
    insert_config(conn, "forward_horizon_days", "60")?;
    Ok(())
}
