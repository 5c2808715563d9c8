//! 本地文件内容指纹：MD5 十六进制小写串，与 Google Drive 的 `md5Checksum` 同算法。

use std::path::Path;

use md5::{Digest, Md5};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// 读文件的固定缓冲区大小（64KB），内存占用与文件大小无关
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// 计算本地文件指纹。
///
/// 文件不存在、无法打开或读取中途出错时返回空串，
/// 调用方把空串当作「无法确认」，需要重新下载。
pub async fn fingerprint(local_path: impl AsRef<Path>) -> String {
    let Ok(mut file) = File::open(local_path.as_ref()).await else {
        return String::new();
    };

    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match file.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(_) => return String::new(),
        }
    }

    format!("{:x}", hasher.finalize())
}

/// 两个指纹都非空且相同（忽略大小写）时才算一致
pub fn fingerprints_match(local: &str, expected: &str) -> bool {
    !local.is_empty()
        && !expected.is_empty()
        && local.eq_ignore_ascii_case(expected)
}
