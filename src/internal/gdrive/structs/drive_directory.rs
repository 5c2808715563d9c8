use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::internal::auth::structs::DriveAuth;
use crate::internal::gdrive::structs::{DriveFile, DriveFileList};
use crate::internal::remote::error::RemoteError;
use crate::internal::remote::structs::{RemoteEntry, RemotePage};
use crate::internal::remote::traits::{ContentStream, RemoteDirectory};

const FILE_FIELDS: &str = "id,name,mimeType,md5Checksum";
const LIST_FIELDS: &str = "nextPageToken,files(id,name,mimeType,md5Checksum)";

/// 基于 Google Drive v3 的远程目录
#[derive(Debug, Clone)]
pub struct DriveDirectory {
    auth: DriveAuth,
}

impl DriveDirectory {
    pub fn new(auth: DriveAuth) -> Self {
        Self { auth }
    }

    /// `{api_base}/files`，可选地追加 `/{id}`
    fn files_url(&self, id: Option<&str>) -> Result<Url, RemoteError> {
        let mut url = self
            .auth
            .api_base
            .join("files")
            .map_err(|e| RemoteError::InvalidPath(e.to_string()))?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|_| RemoteError::InvalidPath(id.to_string()))?
                .push(id);
        }

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        id: &str,
    ) -> Result<T, RemoteError> {
        let resp = self.auth.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(RemoteError::status(status, body));
        }

        serde_json::from_str(&body)
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RemoteDirectory for DriveDirectory {
    async fn get_metadata(&self, id: &str) -> Result<RemoteEntry, RemoteError> {
        let mut url = self.files_url(Some(id))?;
        url.query_pairs_mut().append_pair("fields", FILE_FIELDS);

        let file: DriveFile = self.get_json(url, id).await?;

        // 原生文档作为根时直接报错，而不是留到下载阶段反复失败
        if file.is_google_native() {
            return Err(RemoteError::NotDownloadable {
                id: file.id,
                kind: file.mime_type,
            });
        }

        Ok(file.into())
    }

    async fn list_children(
        &self,
        container_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<RemotePage, RemoteError> {
        let mut url = self.files_url(None)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair(
                    "q",
                    &format!(
                        "'{}' in parents and trashed = false",
                        container_id.replace('\'', "\\'")
                    ),
                )
                .append_pair("pageSize", &page_size.to_string())
                .append_pair("spaces", "drive")
                .append_pair("corpora", "user")
                .append_pair("fields", LIST_FIELDS);
            if let Some(token) = page_token.filter(|t| !t.is_empty()) {
                query.append_pair("pageToken", token);
            }
        }

        let list: DriveFileList = self.get_json(url, container_id).await?;

        let mut entries = Vec::with_capacity(list.files.len());
        for file in list.files {
            if file.is_google_native() {
                warn!(
                    id = %file.id,
                    name = %file.name,
                    mime = %file.mime_type,
                    "原生文档无法直接下载，已跳过"
                );
                continue;
            }
            entries.push(file.into());
        }

        debug!(
            container = container_id,
            count = entries.len(),
            has_next = list.next_page_token.is_some(),
            "列表页读取完成"
        );

        Ok(RemotePage { entries, next_page_token: list.next_page_token })
    }

    async fn fetch_content(
        &self,
        id: &str,
    ) -> Result<ContentStream, RemoteError> {
        let mut url = self.files_url(Some(id))?;
        url.query_pairs_mut().append_pair("alt", "media");

        let resp = self.auth.client.get(url).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::status(status, body));
        }

        Ok(resp.bytes_stream().map_err(RemoteError::from).boxed())
    }
}
