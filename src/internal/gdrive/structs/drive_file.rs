use serde::Deserialize;

use crate::internal::remote::enums::EntryKind;
use crate::internal::remote::structs::RemoteEntry;

/// Google 原生文档（Docs/Sheets/快捷方式等）的 MIME 前缀
const GOOGLE_APPS_PREFIX: &str = "application/vnd.google-apps.";

/// `files.get` / `files.list` 返回的文件资源（只取用到的字段）
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub md5_checksum: Option<String>,
}

/// `files.list` 的一页
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

impl DriveFile {
    pub fn kind(&self) -> EntryKind {
        EntryKind::from_mime(&self.mime_type)
    }

    /// 原生文档没有可下载的字节内容，`alt=media` 会直接失败
    pub fn is_google_native(&self) -> bool {
        self.mime_type.starts_with(GOOGLE_APPS_PREFIX)
            && !self.kind().is_container()
    }
}

impl From<DriveFile> for RemoteEntry {
    fn from(file: DriveFile) -> Self {
        let kind = file.kind();
        RemoteEntry {
            id: file.id,
            name: file.name,
            kind,
            fingerprint: match kind {
                EntryKind::File => file.md5_checksum.unwrap_or_default(),
                EntryKind::Container => String::new(),
            },
        }
    }
}
