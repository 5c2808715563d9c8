use core::fmt;
use std::sync::Arc;

use base64::Engine;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use url::Url;

use crate::internal::auth::error::AuthError;

use super::digest_token;

/// WebDAV 认证结构体
///
/// - 持有带 Basic 认证头的 http 客户端与基准地址
/// - 由 [`crate::webdav::WebdavDirectory`] 使用，所有条目 id 都相对于 `base_url`
///
/// 默认Eq时会匹配base_url和token，如果需要单独比较token，需使用eq_only_token方法
#[derive(Clone)]
pub struct WebdavAuth {
    pub client: Client,     // 内部是Arc，不需要特殊处理
    pub base_url: Arc<Url>, // 需要跨 await 共享，用 Arc
    pub(crate) token_digest: Arc<String>, // 对外导出时，不允许直接访问，哪怕它只是摘要
}

impl WebdavAuth {
    /// 创建新的认证结构体
    pub fn new(
        username: &str,
        password: &str,
        base_url: &str,
    ) -> Result<Self, AuthError> {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", token))?,
        );

        let client = Client::builder()
            .http1_only()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::new(format_base_url(base_url)?),
            token_digest: Arc::new(digest_token(&token)),
        })
    }

    /// 仅比较token是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.token_digest == other.token_digest
    }
}

impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.token_digest == other.token_digest
            && self.base_url == other.base_url
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("base_url", &self.base_url.as_str())
            .field("client", &"<Client with hidden authorization>")
            .finish()
    }
}

/// 基准地址必须以 `/` 结尾，否则 `Url::join` 会吃掉最后一段
pub(crate) fn format_base_url(url: &str) -> Result<Url, AuthError> {
    if url.is_empty() {
        return Err(AuthError::EmptyUrl);
    }

    let mut base_url = Url::parse(url)?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}
