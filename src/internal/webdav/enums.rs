use reqwest::Method;

use crate::internal::remote::error::RemoteError;

pub enum WebDavMethod {
    Propfind,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::Propfind => "PROPFIND",
        }
    }

    pub fn to_method(&self) -> Result<Method, RemoteError> {
        Method::from_bytes(self.as_str().as_bytes())
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// 仅返回当前资源
    Zero,
    /// 返回当前资源及直接子资源
    One,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
        }
    }
}
