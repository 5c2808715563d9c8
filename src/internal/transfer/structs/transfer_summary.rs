use std::path::PathBuf;

/// 重试耗尽但被跳过的任务（仅 `SkipAndContinue` 策略下出现）
#[derive(Debug, Clone)]
pub struct FailedTask {
    pub remote_id: String,
    pub local_path: PathBuf,
    pub attempts: usize,
    pub error: String,
}

/// 一次运行的统计
#[derive(Debug, Clone, Default)]
pub struct TransferSummary {
    pub total: usize,
    /// 运行前已标记完成
    pub already_done: usize,
    /// 本地指纹一致，未下载
    pub unchanged: usize,
    pub downloaded: usize,
    pub bytes_written: u64,
    pub failed: Vec<FailedTask>,
}

impl TransferSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
