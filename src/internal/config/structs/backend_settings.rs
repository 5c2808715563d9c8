use core::fmt;

use crate::internal::auth::error::AuthError;
use crate::internal::auth::structs::{DriveAuth, WebdavAuth};
use crate::internal::gdrive::structs::DriveDirectory;
use crate::internal::remote::traits::RemoteDirectory;
use crate::internal::webdav::structs::WebdavDirectory;

/// 已校验的服务连接参数
#[derive(Clone, PartialEq, Eq)]
pub enum BackendSettings {
    GoogleDrive {
        access_token: String,
    },
    Webdav {
        url: String,
        username: String,
        password: String,
    },
}

impl BackendSettings {
    /// 创建已认证的远程目录
    pub fn connect(&self) -> Result<Box<dyn RemoteDirectory>, AuthError> {
        match self {
            BackendSettings::GoogleDrive { access_token } => Ok(Box::new(
                DriveDirectory::new(DriveAuth::new(access_token)?),
            )),
            BackendSettings::Webdav { url, username, password } => {
                Ok(Box::new(WebdavDirectory::new(WebdavAuth::new(
                    username, password, url,
                )?)))
            }
        }
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendSettings::GoogleDrive { .. } => f
                .debug_struct("GoogleDrive")
                .field("access_token", &"<hidden>")
                .finish(),
            BackendSettings::Webdav { url, username, .. } => f
                .debug_struct("Webdav")
                .field("url", url)
                .field("username", username)
                .field("password", &"<hidden>")
                .finish(),
        }
    }
}
