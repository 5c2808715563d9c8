use std::path::PathBuf;

use thiserror::Error;

use crate::internal::auth::error::AuthError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败: {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("缺少配置项: {0}")]
    Missing(&'static str),

    #[error("配置项 {key} 无效: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}
