use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("路径为空")]
    EmptyUrl,

    #[error("地址格式错误: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("访问令牌为空")]
    EmptyToken,

    #[error("认证头格式错误: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("创建 http 客户端失败: {0}")]
    Client(#[from] reqwest::Error),

    #[error("读取令牌文件 {path} 失败: {message}")]
    TokenFile { path: String, message: String },
}
