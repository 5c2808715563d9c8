use std::str::FromStr;

use serde::Deserialize;

use crate::internal::config::error::ConfigError;

/// 远程服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    #[serde(alias = "drive", alias = "google")]
    Gdrive,
    Webdav,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gdrive" | "drive" | "google" => Ok(Backend::Gdrive),
            "webdav" => Ok(Backend::Webdav),
            other => Err(ConfigError::InvalidValue {
                key: "backend",
                message: format!("未知的服务类型: {other}"),
            }),
        }
    }
}
