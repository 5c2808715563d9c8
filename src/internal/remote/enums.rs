use serde::{Deserialize, Serialize};

/// 远程条目的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// 普通文件，可下载
    File,
    /// 容器（文件夹），可列出子条目
    Container,
}

impl EntryKind {
    pub fn is_container(&self) -> bool {
        matches!(self, EntryKind::Container)
    }

    /// 根据类 MIME 字段判断类型：以 `folder` 结尾即为容器。
    ///
    /// Google Drive 的文件夹为 `application/vnd.google-apps.folder`。
    pub fn from_mime(mime: &str) -> Self {
        if mime.ends_with("folder") {
            EntryKind::Container
        } else {
            EntryKind::File
        }
    }
}
