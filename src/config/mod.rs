// ==========================================
// 人工排程引擎 - 配置层
// ==========================================
// 职责: 读取组织级排程配置
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod schedule_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, parse_work_week_json, ConfigManager};
pub use schedule_config_trait::ScheduleConfigReader;
