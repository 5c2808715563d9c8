use crate::internal::remote::enums::EntryKind;

/// 从远程服务读取的条目，本地只读不改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub id: String,          // 稳定的远程标识
    pub name: String,        // 显示名，用于拼接本地路径
    pub kind: EntryKind,     // 文件或容器
    pub fingerprint: String, // 内容指纹（MD5 hex），容器或服务未提供时为空
}

impl RemoteEntry {
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::File,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn container(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::Container,
            fingerprint: String::new(),
        }
    }
}

/// 分页列出子条目的一页结果
#[derive(Debug, Clone, Default)]
pub struct RemotePage {
    pub entries: Vec<RemoteEntry>,
    /// 下一页的续传令牌；`None` 或空串表示已是最后一页
    pub next_page_token: Option<String>,
}

impl RemotePage {
    /// 取出有效的下一页令牌（空串视为没有）。
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}
