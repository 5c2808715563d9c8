use quick_xml::de::from_str;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::internal::auth::structs::WebdavAuth;
use crate::internal::remote::error::RemoteError;
use crate::internal::webdav::enums::{Depth, WebDavMethod};
use crate::internal::webdav::raw_xml::MultiStatus;

/// 只请求遍历需要的两个属性
const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:resourcetype/>
    <D:displayname/>
  </D:prop>
</D:propfind>"#;

/// 发送 PROPFIND 并解析 multistatus
pub(crate) async fn propfind(
    webdav_auth: &WebdavAuth,
    absolute_url: &Url,
    depth: Depth,
) -> Result<MultiStatus, RemoteError> {
    let mut headers = HeaderMap::new();
    headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
    headers.insert("Depth", HeaderValue::from_static(depth.as_str()));
    headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

    let res = webdav_auth
        .client
        .request(WebDavMethod::Propfind.to_method()?, absolute_url.clone())
        .headers(headers)
        .body(PROPFIND_BODY)
        .send()
        .await?;

    let status = res.status();
    let xml_text = res.text().await?;

    if status == StatusCode::NOT_FOUND {
        return Err(RemoteError::NotFound(absolute_url.to_string()));
    }
    if !status.is_success() {
        return Err(RemoteError::status(status, xml_text));
    }

    from_str(&xml_text).map_err(|e| RemoteError::Decode(e.to_string()))
}
