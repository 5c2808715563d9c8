use std::time::Duration;

use crate::internal::transfer::enums::FailurePolicy;

/// 默认每个任务最多尝试次数
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// 默认退避单位：第 n 次失败后等待 n × 5 秒
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(5);

/// 默认每完成 10 个任务落盘一次
pub const DEFAULT_CHECKPOINT_EVERY: usize = 10;

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// 每个任务最多尝试次数（至少 1）
    pub max_attempts: usize,
    /// 线性退避单位
    pub backoff_unit: Duration,
    /// 每完成多少个任务保存一次检查点（至少 1）
    pub checkpoint_every: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl TransferConfig {
    /// 第 `attempt` 次（从 1 开始）失败后的等待时长
    pub fn backoff_for(&self, attempt: usize) -> Duration {
        self.backoff_unit
            .saturating_mul(u32::try_from(attempt).unwrap_or(u32::MAX))
    }
}
