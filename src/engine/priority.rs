// ==========================================
// 人工排程引擎 - 作业优先级排序
// ==========================================
// 职责: 决定倒排时作业的处理顺序
// 输入: 待排作业列表（调用方给定顺序）
// 输出: 排序后的作业列表
// ==========================================

use crate::domain::job::JobScheduleInput;
use std::cmp::Ordering;

// ==========================================
// JobPrioritySorter - 作业排序引擎
// ==========================================
pub struct JobPrioritySorter {
    // 无状态引擎，不需要注入依赖
}

impl JobPrioritySorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 排序作业列表
    ///
    /// 排序键:
    /// 1) due_date 升序（早交期先占用临近交期的产能）
    /// 2) 同交期时加急作业优先
    /// 3) 其余按输入顺序（稳定排序，属于既定策略）
    pub fn sort(&self, mut jobs: Vec<JobScheduleInput>) -> Vec<JobScheduleInput> {
        jobs.sort_by(|a, b| self.compare(a, b));
        jobs
    }

    /// 返回排序后的输入下标（不搬动作业本身）
    pub fn sorted_indices(&self, jobs: &[JobScheduleInput]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&jobs[a], &jobs[b]));
        indices
    }

    /// 比较两个作业的优先级
    pub fn compare(&self, a: &JobScheduleInput, b: &JobScheduleInput) -> Ordering {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| b.is_rush.cmp(&a.is_rush))
    }
}

impl Default for JobPrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}
