pub mod drive_auth;
pub mod webdav_auth;

pub use drive_auth::DriveAuth;
pub use webdav_auth::WebdavAuth;

use sha2::{Digest, Sha256};

/// 令牌只保留摘要，用于比较是否为同一账号，避免明文常驻内存结构体。
pub(crate) fn digest_token(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
