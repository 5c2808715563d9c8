//! 把内容流写到本地：先写同目录下的隐藏临时文件，校验通过后再 rename 到目标路径。

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use md5::{Digest, Md5};
use tempfile::TempPath;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::internal::remote::traits::ContentStream;
use crate::internal::transfer::error::TaskError;

/// 写盘缓冲区大小（1MB）
const WRITE_BUFFER_SIZE: usize = 1024 * 1024;

/// 临时文件名前缀与后缀：`.<随机串>.part`
pub(crate) const STAGING_PREFIX: &str = ".";
pub(crate) const STAGING_SUFFIX: &str = ".part";

/// 写入内容流并返回写入字节数。
///
/// 临时文件以独占方式新建，名字随机，不会覆盖同目录下任何已有文件；
/// 失败时 `TempPath` 被 drop，临时文件随之删除。
/// `expected` 非空时，对流过的字节做 MD5 校验，不一致则失败且不覆盖目标文件。
pub(crate) async fn write_stream(
    local_path: &Path,
    mut stream: ContentStream,
    expected: &str,
) -> Result<u64, TaskError> {
    let parent = staging_dir(local_path);
    fs::create_dir_all(&parent)
        .await
        .map_err(TaskError::local_write(&parent))?;

    let (std_file, staging) = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(&parent)
        .map_err(TaskError::local_write(&parent))?
        .into_parts();

    let bytes =
        write_staging(File::from_std(std_file), &staging, &mut stream, expected)
            .await?;

    staging
        .persist(local_path)
        .map_err(|e| TaskError::LocalWrite {
            path: local_path.to_path_buf(),
            source: e.error,
        })?;

    Ok(bytes)
}

async fn write_staging(
    file: File,
    staging: &TempPath,
    stream: &mut ContentStream,
    expected: &str,
) -> Result<u64, TaskError> {
    let staging_path: &Path = staging;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    let mut hasher = Md5::new();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        hasher.update(&chunk);
        writer
            .write_all(&chunk)
            .await
            .map_err(TaskError::local_write(staging_path))?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(TaskError::local_write(staging_path))?;
    writer
        .into_inner()
        .sync_all()
        .await
        .map_err(TaskError::local_write(staging_path))?;

    let actual = format!("{:x}", hasher.finalize());
    if !expected.is_empty() && !actual.eq_ignore_ascii_case(expected) {
        return Err(TaskError::FingerprintMismatch {
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(written)
}

/// 临时文件所在目录：目标文件的父目录，没有父目录时为当前目录
fn staging_dir(local_path: &Path) -> PathBuf {
    match local_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
