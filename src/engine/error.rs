// ==========================================
// 人工排程引擎 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 口径: 产能不足不是错误（以缺口工时上报），只有调用契约被破坏才报错
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 调用方传入了不应出现的参数
    #[error("无效输入: {0}")]
    InvalidInput(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }
}

// ==========================================
// 通用校验
// ==========================================

/// 校验工时为有限正数
pub fn ensure_positive_hours(field: &str, hours: f64) -> EngineResult<()> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(EngineError::invalid_input(format!(
            "{} 必须为正数: {}",
            field, hours
        )));
    }
    Ok(())
}

/// 校验员工数不少于 1
pub fn ensure_employee_count(employee_count: u32) -> EngineResult<()> {
    if employee_count < 1 {
        return Err(EngineError::invalid_input(format!(
            "employee_count 必须 >= 1: {}",
            employee_count
        )));
    }
    Ok(())
}
