use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::internal::remote::enums::EntryKind;
use crate::internal::remote::traits::RemoteDirectory;
use crate::internal::task_list::structs::Task;
use crate::internal::walker::error::WalkError;
use crate::internal::walker::functions::{sanitize_segment, LocalPathAllocator};

/// 默认每页条目数
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// 遍历队列中待展开的容器
struct PendingContainer {
    id: String,
    local_path: PathBuf,
}

/// 远程目录树遍历器
pub struct TreeWalker<'a> {
    remote: &'a dyn RemoteDirectory,
    page_size: u32,
}

impl<'a> TreeWalker<'a> {
    pub fn new(remote: &'a dyn RemoteDirectory) -> Self {
        Self { remote, page_size: DEFAULT_PAGE_SIZE }
    }

    /// 设置分页大小，0 会被当作 1
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// 广度优先展开 `root_id`，返回全部文件任务（`done = false`）。
    ///
    /// - 根是文件时，结果只有一个任务：`root_local_path` 是已存在的目录则落在其中
    ///   （文件名取远程名称），否则 `root_local_path` 就是文件路径
    /// - 根是容器时，其子条目直接落在 `root_local_path` 之下
    pub async fn walk(
        &self,
        root_id: &str,
        root_local_path: &Path,
    ) -> Result<Vec<Task>, WalkError> {
        let root = self.remote.get_metadata(root_id).await.map_err(|source| {
            WalkError::Metadata { id: root_id.to_string(), source }
        })?;

        if root.kind == EntryKind::File {
            let local_path = root_file_path(root_local_path, &root.name).await;
            info!(
                id = %root.id,
                name = %root.name,
                path = %local_path.display(),
                "根条目是文件"
            );
            return Ok(vec![Task::pending(
                root.id,
                local_path,
                root.fingerprint,
            )]);
        }

        let mut tasks = Vec::new();
        let mut queue = VecDeque::new();
        let mut expanded = HashSet::new();
        let mut paths = LocalPathAllocator::new();

        paths.reserve(root_local_path);
        queue.push_back(PendingContainer {
            id: root.id,
            local_path: root_local_path.to_path_buf(),
        });

        while let Some(container) = queue.pop_front() {
            // 同一容器可能挂在多个父目录下，只展开一次
            if !expanded.insert(container.id.clone()) {
                debug!(id = %container.id, "容器已展开过，跳过");
                continue;
            }

            info!(
                id = %container.id,
                path = %container.local_path.display(),
                ">> 列出目录"
            );

            let mut page_token: Option<String> = None;
            for page_index in 0usize.. {
                debug!(id = %container.id, "[{page_index:03}] 读取列表页");

                let page = self
                    .remote
                    .list_children(
                        &container.id,
                        page_token.as_deref(),
                        self.page_size,
                    )
                    .await
                    .map_err(|source| WalkError::List {
                        id: container.id.clone(),
                        local_path: container.local_path.clone(),
                        source,
                    })?;

                if page_index == 0 && page.entries.is_empty() {
                    info!(id = %container.id, "目录为空");
                }

                let next_token = page.continuation().map(str::to_string);

                for entry in page.entries {
                    let local_path =
                        paths.allocate(&container.local_path, &entry.name);
                    match entry.kind {
                        EntryKind::Container => {
                            queue.push_back(PendingContainer {
                                id: entry.id,
                                local_path,
                            })
                        }
                        EntryKind::File => tasks.push(Task::pending(
                            entry.id,
                            local_path,
                            entry.fingerprint,
                        )),
                    }
                }

                match next_token {
                    Some(token) => page_token = Some(token),
                    None => {
                        debug!(id = %container.id, "[{page_index:03}] 列表结束");
                        break;
                    }
                }
            }
        }

        info!(files = tasks.len(), containers = expanded.len(), "遍历完成");
        Ok(tasks)
    }
}

/// 根是文件时的本地路径
async fn root_file_path(root_local_path: &Path, name: &str) -> PathBuf {
    match tokio::fs::metadata(root_local_path).await {
        Ok(meta) if meta.is_dir() => root_local_path.join(sanitize_segment(name)),
        _ => root_local_path.to_path_buf(),
    }
}
