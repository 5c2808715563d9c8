//! 远程访问错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("服务端返回异常状态 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("响应解析失败: {0}")]
    Decode(String),

    #[error("路径格式错误: {0}")]
    InvalidPath(String),

    #[error("远程条目不存在: {0}")]
    NotFound(String),

    #[error("远程条目 {id} 没有可下载的内容（{kind}）")]
    NotDownloadable { id: String, kind: String },
}

impl RemoteError {
    /// 截断过长的响应体，避免把整页 HTML 打进日志。
    pub(crate) fn status(status: reqwest::StatusCode, body: String) -> Self {
        const MAX_BODY: usize = 512;
        let body = if body.len() > MAX_BODY {
            let mut end = MAX_BODY;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}…", &body[..end])
        } else {
            body
        };
        RemoteError::Status { status: status.as_u16(), body }
    }
}
