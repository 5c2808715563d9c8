use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("任务列表不存在: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("任务列表无法解析: {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("任务列表读写失败: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("任务列表序列化失败: {0}")]
    Encode(#[from] serde_json::Error),
}
