// ==========================================
// 人工排程引擎 - 排程配置读取 Trait
// ==========================================
// 职责: 定义排程所需的组织级配置读取接口（不包含实现）
// 红线: 只读；不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::work_week::RawWorkWeek;
use crate::engine::options::SchedulerOptions;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ScheduleConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ScheduleConfigReader: Send + Sync {
    /// 获取原始整周作息（未规范化，可缺项）
    ///
    /// # 默认值
    /// - 空映射（由规范化补齐为默认工作周）
    async fn get_work_week_schedule(&self) -> Result<RawWorkWeek, Box<dyn Error>>;

    /// 获取员工数
    ///
    /// # 默认值
    /// - 1
    ///
    /// # 说明
    /// 原样返回配置值；是否合法（>= 1）由引擎校验
    async fn get_employee_count(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取排程选项（窗口天数、日期下限）
    ///
    /// # 默认值
    /// - 倒排/正推窗口均为 365 天，无日期下限
    async fn get_scheduler_options(&self) -> Result<SchedulerOptions, Box<dyn Error>>;
}
