use std::path::PathBuf;

use thiserror::Error;

use crate::internal::remote::error::RemoteError;

/// 单次尝试的失败原因，都可重试
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("下载远程内容失败: {0}")]
    Fetch(#[from] RemoteError),

    #[error("写入本地文件失败: {}: {source}", .path.display())]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("内容指纹不一致: 期望 {expected}，实际 {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

impl TaskError {
    pub(crate) fn local_write(
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| TaskError::LocalWrite { path, source }
    }
}

/// 运行级失败
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(
        "任务 {remote_id} -> {} 重试 {attempts} 次后仍失败: {source}",
        .local_path.display()
    )]
    RetriesExhausted {
        remote_id: String,
        local_path: PathBuf,
        attempts: usize,
        #[source]
        source: TaskError,
    },
}
