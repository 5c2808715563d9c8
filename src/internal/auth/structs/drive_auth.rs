use core::fmt;
use std::path::Path;
use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde::Deserialize;
use url::Url;

use crate::internal::auth::error::AuthError;

use super::webdav_auth::format_base_url;

/// Google Drive v3 API 的默认地址
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3/";

/// Google Drive 认证结构体
///
/// 只接收现成的访问令牌（Bearer），令牌的获取与刷新由外部完成。
#[derive(Clone)]
pub struct DriveAuth {
    pub client: Client,
    pub api_base: Arc<Url>,
}

/// OAuth2 令牌文件，只关心 `access_token` 字段
#[derive(Deserialize)]
struct TokenFile {
    access_token: String,
}

impl DriveAuth {
    /// 使用默认 API 地址创建
    pub fn new(access_token: &str) -> Result<Self, AuthError> {
        Self::with_api_base(access_token, DRIVE_API_BASE)
    }

    /// 指定 API 地址创建（测试或代理场景）
    pub fn with_api_base(
        access_token: &str,
        api_base: &str,
    ) -> Result<Self, AuthError> {
        let access_token = access_token.trim();
        if access_token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", access_token))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: Arc::new(format_base_url(api_base)?),
        })
    }

    /// 从 OAuth2 令牌文件（JSON，含 `access_token`）读取令牌
    pub fn read_token_file(path: &Path) -> Result<String, AuthError> {
        let to_error = |message: String| AuthError::TokenFile {
            path: path.display().to_string(),
            message,
        };
        let content =
            std::fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
        let token: TokenFile =
            serde_json::from_str(&content).map_err(|e| to_error(e.to_string()))?;
        Ok(token.access_token)
    }
}

impl fmt::Debug for DriveAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveAuth")
            .field("api_base", &self.api_base.as_str())
            .field("client", &"<Client with hidden authorization>")
            .finish()
    }
}
