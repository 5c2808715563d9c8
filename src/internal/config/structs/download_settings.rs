use core::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::internal::auth::structs::DriveAuth;
use crate::internal::config::enums::Backend;
use crate::internal::config::error::ConfigError;
use crate::internal::config::structs::BackendSettings;
use crate::internal::entrance::mirror::{MirrorOptions, MirrorRequest};
use crate::internal::transfer::enums::FailurePolicy;
use crate::internal::walker::functions::sanitize_segment;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "config-download.toml";

/// 未解析的下载配置，每一项都可缺省，便于多来源叠加
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownloadSettings {
    pub backend: Option<Backend>,
    /// 远程根 id
    pub src: Option<String>,
    /// 本地目标路径（根为文件且该路径不是已有目录时，即为文件路径）
    pub dst: Option<PathBuf>,
    /// 任务列表文件，缺省放在用户缓存目录
    pub list_file: Option<PathBuf>,
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
    pub webdav_url: Option<String>,
    pub webdav_username: Option<String>,
    pub webdav_password: Option<String>,
    pub page_size: Option<u32>,
    pub max_attempts: Option<usize>,
    pub backoff_secs: Option<u64>,
    pub checkpoint_every: Option<usize>,
    pub skip_failed: Option<bool>,
    pub rescan: Option<bool>,
}

/// 解析完成、可直接运行的配置
#[derive(Debug, Clone)]
pub struct ResolvedDownload {
    pub backend: BackendSettings,
    pub request: MirrorRequest,
    pub options: MirrorOptions,
}

impl DownloadSettings {
    /// 读取 TOML 配置文件；文件不存在时返回空配置
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 用 `upper` 中已设置的项覆盖当前配置
    pub fn overlay(self, upper: Self) -> Self {
        Self {
            backend: upper.backend.or(self.backend),
            src: upper.src.or(self.src),
            dst: upper.dst.or(self.dst),
            list_file: upper.list_file.or(self.list_file),
            token: upper.token.or(self.token),
            token_file: upper.token_file.or(self.token_file),
            webdav_url: upper.webdav_url.or(self.webdav_url),
            webdav_username: upper.webdav_username.or(self.webdav_username),
            webdav_password: upper.webdav_password.or(self.webdav_password),
            page_size: upper.page_size.or(self.page_size),
            max_attempts: upper.max_attempts.or(self.max_attempts),
            backoff_secs: upper.backoff_secs.or(self.backoff_secs),
            checkpoint_every: upper.checkpoint_every.or(self.checkpoint_every),
            skip_failed: upper.skip_failed.or(self.skip_failed),
            rescan: upper.rescan.or(self.rescan),
        }
    }

    /// 校验并补齐缺省值
    pub fn resolve(self) -> Result<ResolvedDownload, ConfigError> {
        let backend_kind = self.backend.unwrap_or_default();
        let src = self.src.ok_or(ConfigError::Missing("src"))?;
        let dst = self.dst.ok_or(ConfigError::Missing("dst"))?;

        let backend = match backend_kind {
            Backend::Gdrive => {
                if src.trim().is_empty() {
                    return Err(ConfigError::Missing("src"));
                }
                let access_token = match (self.token, self.token_file) {
                    (Some(token), _) => token,
                    (None, Some(path)) => DriveAuth::read_token_file(&path)?,
                    (None, None) => {
                        return Err(ConfigError::Missing("token / token_file"));
                    }
                };
                BackendSettings::GoogleDrive { access_token }
            }
            Backend::Webdav => BackendSettings::Webdav {
                url: self.webdav_url.ok_or(ConfigError::Missing("webdav_url"))?,
                username: self.webdav_username.unwrap_or_default(),
                password: self.webdav_password.unwrap_or_default(),
            },
        };

        let list_path = match self.list_file {
            Some(path) => path,
            None => default_list_path(&src),
        };

        let defaults = MirrorOptions::default();
        let mut options = defaults.clone();
        options.page_size = positive("page_size", self.page_size, defaults.page_size)?;
        options.transfer.max_attempts = positive(
            "max_attempts",
            self.max_attempts,
            defaults.transfer.max_attempts,
        )?;
        options.transfer.checkpoint_every = positive(
            "checkpoint_every",
            self.checkpoint_every,
            defaults.transfer.checkpoint_every,
        )?;
        if let Some(secs) = self.backoff_secs {
            options.transfer.backoff_unit = Duration::from_secs(secs);
        }
        if self.skip_failed.unwrap_or(false) {
            options.transfer.failure_policy = FailurePolicy::SkipAndContinue;
        }
        options.rescan = self.rescan.unwrap_or(false);

        Ok(ResolvedDownload {
            backend,
            request: MirrorRequest {
                root_id: src,
                root_local_path: dst,
                list_path,
            },
            options,
        })
    }
}

fn positive<T>(key: &'static str, value: Option<T>, default: T) -> Result<T, ConfigError>
where
    T: PartialOrd + Default + fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) if v > T::default() => Ok(v),
        Some(v) => Err(ConfigError::InvalidValue {
            key,
            message: format!("必须大于 0，实际为 {v}"),
        }),
    }
}

/// `<用户缓存目录>/drive_mirror/<src>.json`，取不到缓存目录时落在当前目录
pub fn default_list_path(src: &str) -> PathBuf {
    let file_name = format!("{}.json", sanitize_segment(src));
    match dirs::cache_dir() {
        Some(dir) => dir.join(env!("CARGO_PKG_NAME")).join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 防止debug泄漏账号
impl fmt::Debug for DownloadSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = |v: &Option<String>| v.as_ref().map(|_| "<hidden>");
        f.debug_struct("DownloadSettings")
            .field("backend", &self.backend)
            .field("src", &self.src)
            .field("dst", &self.dst)
            .field("list_file", &self.list_file)
            .field("token", &hidden(&self.token))
            .field("token_file", &self.token_file)
            .field("webdav_url", &self.webdav_url)
            .field("webdav_username", &self.webdav_username)
            .field("webdav_password", &hidden(&self.webdav_password))
            .field("page_size", &self.page_size)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_secs", &self.backoff_secs)
            .field("checkpoint_every", &self.checkpoint_every)
            .field("skip_failed", &self.skip_failed)
            .field("rescan", &self.rescan)
            .finish()
    }
}
