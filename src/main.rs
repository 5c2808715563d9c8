//! drive_mirror：把云存储上的文件或目录树下载到本地，可中断续传。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use drive_mirror::config::{Backend, DownloadSettings, DEFAULT_CONFIG_FILE};
use drive_mirror::logging::init_logging;
use drive_mirror::mirror;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "drive_mirror", version, about = "递归下载云存储目录，支持断点续传")]
struct Cli {
    /// 日志级别（RUST_LOG 优先）
    #[arg(long, global = true, env = "GD_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 下载远程文件或目录
    Download(DownloadArgs),
}

#[derive(Args)]
struct DownloadArgs {
    /// TOML 配置文件，不存在时忽略
    #[arg(long, env = "GD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// 远程服务：gdrive | webdav
    #[arg(long, env = "GD_BACKEND")]
    backend: Option<Backend>,

    /// 远程根 id（Google Drive 文件 id，或 WebDAV 相对路径）
    #[arg(long, env = "GD_SRC")]
    src: Option<String>,

    /// 本地目标路径：根为目录时是目标目录；根为文件时，已存在的目录表示下载到其中，
    /// 否则即为文件路径
    #[arg(long, env = "GD_DST")]
    dst: Option<PathBuf>,

    /// 任务列表文件，不存在时自动创建
    #[arg(long, env = "GD_LIST_FILE")]
    list_file: Option<PathBuf>,

    /// Google Drive 访问令牌
    #[arg(long, env = "GD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// 含 access_token 的 OAuth2 令牌文件
    #[arg(long, env = "GD_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[arg(long, env = "GD_WEBDAV_URL")]
    webdav_url: Option<String>,

    #[arg(long, env = "GD_WEBDAV_USERNAME")]
    webdav_username: Option<String>,

    #[arg(long, env = "GD_WEBDAV_PASSWORD", hide_env_values = true)]
    webdav_password: Option<String>,

    /// 列目录时每页条目数
    #[arg(long, env = "GD_PAGE_SIZE")]
    page_size: Option<u32>,

    /// 每个文件最多尝试次数
    #[arg(long, env = "GD_MAX_ATTEMPTS")]
    max_attempts: Option<usize>,

    /// 退避单位（秒），第 n 次失败后等待 n 倍
    #[arg(long, env = "GD_BACKOFF_SECS")]
    backoff_secs: Option<u64>,

    /// 每完成多少个文件保存一次任务列表
    #[arg(long, env = "GD_CHECKPOINT_EVERY")]
    checkpoint_every: Option<usize>,

    /// 重试耗尽时跳过该文件继续，而不是中止
    #[arg(long)]
    skip_failed: bool,

    /// 忽略已有任务列表，重新遍历远程目录
    #[arg(long)]
    rescan: bool,
}

impl DownloadArgs {
    fn into_settings(self) -> (PathBuf, DownloadSettings) {
        let settings = DownloadSettings {
            backend: self.backend,
            src: self.src,
            dst: self.dst,
            list_file: self.list_file,
            token: self.token,
            token_file: self.token_file,
            webdav_url: self.webdav_url,
            webdav_username: self.webdav_username,
            webdav_password: self.webdav_password,
            page_size: self.page_size,
            max_attempts: self.max_attempts,
            backoff_secs: self.backoff_secs,
            checkpoint_every: self.checkpoint_every,
            skip_failed: self.skip_failed.then_some(true),
            rescan: self.rescan.then_some(true),
        };
        (self.config, settings)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env 只补充尚未设置的环境变量
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Download(args) => download(args).await,
    }
}

async fn download(args: DownloadArgs) -> ExitCode {
    let (config_path, cli_settings) = args.into_settings();

    let resolved = match DownloadSettings::from_file(&config_path)
        .map(|file_settings| file_settings.overlay(cli_settings))
        .and_then(DownloadSettings::resolve)
    {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("配置错误: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        backend = ?resolved.backend,
        request = ?resolved.request,
        "配置已加载"
    );

    let remote = match resolved.backend.connect() {
        Ok(remote) => remote,
        Err(e) => {
            error!("创建远程客户端失败: {e}");
            return ExitCode::FAILURE;
        }
    };

    match mirror(remote.as_ref(), &resolved.request, &resolved.options).await {
        Ok(summary) if summary.is_complete() => ExitCode::SUCCESS,
        Ok(summary) => {
            for failed in &summary.failed {
                warn!(
                    id = %failed.remote_id,
                    path = %failed.local_path.display(),
                    attempts = failed.attempts,
                    "未完成: {}",
                    failed.error
                );
            }
            ExitCode::from(2)
        }
        Err(e) => {
            error!("运行中止: {e}");
            ExitCode::FAILURE
        }
    }
}
