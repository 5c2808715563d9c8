//! 远程目录访问能力：遍历器与执行器只通过这个 trait 访问远程服务。
//!
//! 认证在实现内部完成（见 [`crate::auth`]），核心不关心令牌从何而来。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::internal::remote::error::RemoteError;
use crate::internal::remote::structs::{RemoteEntry, RemotePage};

/// 文件内容字节流
pub type ContentStream = BoxStream<'static, Result<Bytes, RemoteError>>;

#[async_trait]
pub trait RemoteDirectory: Send + Sync {
    /// 读取单个条目的元数据（id、名称、类型、指纹）。
    async fn get_metadata(&self, id: &str) -> Result<RemoteEntry, RemoteError>;

    /// 分页列出容器的直接子条目。`page_token` 为上一页返回的令牌，首页传 `None`。
    async fn list_children(
        &self,
        container_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<RemotePage, RemoteError>;

    /// 获取文件内容的字节流。
    async fn fetch_content(
        &self,
        id: &str,
    ) -> Result<ContentStream, RemoteError>;
}
