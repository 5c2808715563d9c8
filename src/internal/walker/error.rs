use std::path::PathBuf;

use thiserror::Error;

use crate::internal::remote::error::RemoteError;

/// 遍历失败：任一请求失败都会中止整个遍历，不返回部分结果。
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("读取远程条目 {id} 失败: {source}")]
    Metadata {
        id: String,
        #[source]
        source: RemoteError,
    },

    #[error("列出远程目录 {id} ({}) 失败: {source}", .local_path.display())]
    List {
        id: String,
        local_path: PathBuf,
        #[source]
        source: RemoteError,
    },
}
