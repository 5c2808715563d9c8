/// 单个任务重试耗尽后的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 立即中止整个运行，后续任务不再执行
    #[default]
    FailFast,
    /// 记录失败并继续后续任务，失败任务保持 `done = false`
    SkipAndContinue,
}

/// 单个任务成功时的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 本地文件指纹已一致，未发起下载
    Unchanged,
    /// 已下载并写入
    Downloaded { bytes: u64 },
}
