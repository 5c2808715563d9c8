use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use tracing::debug;
use url::Url;

use crate::internal::auth::structs::WebdavAuth;
use crate::internal::remote::error::RemoteError;
use crate::internal::remote::structs::{RemoteEntry, RemotePage};
use crate::internal::remote::traits::{ContentStream, RemoteDirectory};
use crate::internal::webdav::enums::Depth;
use crate::internal::webdav::functions::propfind;
use crate::internal::webdav::raw_xml::impl_multi_status::{
    relative_id, same_resource,
};
use crate::internal::webdav::raw_xml::ToRemoteEntries;

/// 基于 WebDAV 的远程目录
///
/// 一次 `PROPFIND Depth: 1` 即返回容器的全部子条目，所以只有一页，忽略分页参数。
#[derive(Debug, Clone)]
pub struct WebdavDirectory {
    auth: WebdavAuth,
}

impl WebdavDirectory {
    pub fn new(auth: WebdavAuth) -> Self {
        Self { auth }
    }

    /// 把 id 拼成绝对地址，并确保不会逃出 base_url
    fn resolve(&self, id: &str, as_container: bool) -> Result<Url, RemoteError> {
        let base_url = self.auth.base_url.as_ref();
        let relative = id.trim_start_matches("./").trim_start_matches('/');

        // 加上 `./`，首段含 `:` 时（如 `a:b.txt`）不会被当成带 scheme 的绝对地址
        let mut path = format!("./{relative}");
        if as_container && !relative.is_empty() && !path.ends_with('/') {
            path.push('/');
        }

        let joined_url = base_url
            .join(&path)
            .map_err(|_| RemoteError::InvalidPath(id.to_string()))?;

        if joined_url.scheme() != base_url.scheme()
            || joined_url.host_str() != base_url.host_str()
            || joined_url.port_or_known_default() != base_url.port_or_known_default()
            || !joined_url.path().starts_with(base_url.path())
        {
            return Err(RemoteError::InvalidPath(id.to_string()));
        }

        Ok(joined_url)
    }
}

#[async_trait]
impl RemoteDirectory for WebdavDirectory {
    async fn get_metadata(&self, id: &str) -> Result<RemoteEntry, RemoteError> {
        let url = self.resolve(id, false)?;
        let multi_status = propfind(&self.auth, &url, Depth::Zero).await?;

        multi_status
            .to_remote_entries(&self.auth.base_url)
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))
    }

    async fn list_children(
        &self,
        container_id: &str,
        _page_token: Option<&str>,
        _page_size: u32,
    ) -> Result<RemotePage, RemoteError> {
        let url = self.resolve(container_id, true)?;
        let self_id = relative_id(&self.auth.base_url, &url)
            .ok_or_else(|| RemoteError::InvalidPath(container_id.to_string()))?;

        let multi_status = propfind(&self.auth, &url, Depth::One).await?;

        // 响应里包含容器自身，去掉
        let entries = multi_status
            .to_remote_entries(&self.auth.base_url)
            .into_iter()
            .filter(|entry| !same_resource(&entry.id, &self_id))
            .collect::<Vec<_>>();

        debug!(container = %url, count = entries.len(), "PROPFIND 完成");

        Ok(RemotePage { entries, next_page_token: None })
    }

    async fn fetch_content(
        &self,
        id: &str,
    ) -> Result<ContentStream, RemoteError> {
        let url = self.resolve(id, false)?;
        let resp = self.auth.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::status(status, body));
        }

        Ok(resp.bytes_stream().map_err(RemoteError::from).boxed())
    }
}
