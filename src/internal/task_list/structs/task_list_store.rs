use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::internal::task_list::error::StoreError;
use crate::internal::task_list::structs::Task;

/// 任务列表的持久化存储
///
/// 单写者假设：同一路径不会被并发 `save`。
#[derive(Debug, Clone)]
pub struct TaskListStore {
    path: PathBuf,
}

impl TaskListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取任务列表；不存在或无法解析时返回错误，由调用方决定是否重新遍历。
    pub async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path: self.path.clone() });
            }
            Err(source) => {
                return Err(StoreError::Io { path: self.path.clone(), source });
            }
        };

        serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// 覆盖写入任务列表：先写同目录下随机命名的隐藏临时文件，再 rename 覆盖，
    /// 中途崩溃不会留下半截文档，也不会碰到目录里的其他文件。
    pub async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut content = serde_json::to_vec_pretty(tasks)?;
        content.push(b'\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).await.map_err(io_error(&dir))?;

        let (std_file, temp_path) = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(io_error(&dir))?
            .into_parts();

        let mut file = fs::File::from_std(std_file);
        file.write_all(&content).await.map_err(io_error(&temp_path))?;
        file.sync_all().await.map_err(io_error(&temp_path))?;
        drop(file);

        temp_path
            .persist(&self.path)
            .map_err(|e| StoreError::Io { path: self.path.clone(), source: e.error })
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}
