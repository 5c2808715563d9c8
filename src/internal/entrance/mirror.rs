//! 本库主入口：一次镜像运行 = 加载（或重建）任务列表 + 执行。

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::internal::remote::traits::RemoteDirectory;
use crate::internal::task_list::error::StoreError;
use crate::internal::task_list::structs::task::count_done;
use crate::internal::task_list::structs::{Task, TaskListStore};
use crate::internal::transfer::error::TransferError;
use crate::internal::transfer::structs::{
    TransferConfig, TransferExecutor, TransferSummary,
};
use crate::internal::walker::error::WalkError;
use crate::internal::walker::structs::{TreeWalker, DEFAULT_PAGE_SIZE};

/// 一次运行的三个逻辑输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    /// 远程根 id（文件或容器）
    pub root_id: String,
    /// 本地目标路径
    pub root_local_path: PathBuf,
    /// 任务列表文件
    pub list_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub page_size: u32,
    pub transfer: TransferConfig,
    /// 忽略已有任务列表，重新遍历
    pub rescan: bool,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            transfer: TransferConfig::default(),
            rescan: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// 把远程 `root_id` 镜像到本地 `root_local_path`。
///
/// 任务列表可加载时直接续传；加载失败（不存在、损坏）时重新遍历远程目录并立即保存。
/// 全部完成后再次运行不会产生任何下载。
pub async fn mirror(
    remote: &dyn RemoteDirectory,
    request: &MirrorRequest,
    options: &MirrorOptions,
) -> Result<TransferSummary, MirrorError> {
    let store = TaskListStore::new(&request.list_path);

    let loaded = if options.rescan {
        info!("忽略已有任务列表，重新遍历");
        None
    } else {
        load_existing(&store).await
    };

    let mut tasks = match loaded {
        Some(tasks) => tasks,
        None => {
            let tasks = TreeWalker::new(remote)
                .page_size(options.page_size)
                .walk(&request.root_id, &request.root_local_path)
                .await?;

            if let Err(e) = store.save(&tasks).await {
                warn!(error = %e, "保存任务列表失败");
            }
            tasks
        }
    };

    info!(
        total = tasks.len(),
        done = count_done(&tasks),
        list = %store.path().display(),
        "文件总数"
    );

    let summary = TransferExecutor::new(remote, &store)
        .with_config(options.transfer.clone())
        .run(&mut tasks)
        .await?;

    Ok(summary)
}

async fn load_existing(store: &TaskListStore) -> Option<Vec<Task>> {
    match store.load().await {
        Ok(tasks) => {
            info!(path = %store.path().display(), "已加载任务列表，继续执行");
            Some(tasks)
        }
        Err(StoreError::NotFound { path }) => {
            info!(path = %path.display(), "任务列表不存在，遍历远程目录");
            None
        }
        Err(e) => {
            warn!(error = %e, "加载任务列表失败，重新遍历远程目录");
            None
        }
    }
}
