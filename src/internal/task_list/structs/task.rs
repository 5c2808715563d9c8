use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// 一个文件的下载任务
///
/// `done == true` 意味着本地 `local_path` 处已有文件，且指纹（非空时）与 `fingerprint` 一致。
/// 任务只会在遍历时追加、在执行时修改 `done`，不会被删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "id")]
    pub remote_id: String,
    #[serde(rename = "path")]
    pub local_path: PathBuf,
    /// 期望的内容指纹，远程未提供时为空
    #[serde(rename = "md5", default)]
    pub fingerprint: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn pending(
        remote_id: impl Into<String>,
        local_path: impl Into<PathBuf>,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            remote_id: remote_id.into(),
            local_path: local_path.into(),
            fingerprint: fingerprint.into(),
            done: false,
        }
    }
}

/// 已完成的任务数
pub fn count_done(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.done).count()
}
