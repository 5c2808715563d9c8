use serde::Deserialize;

/// 对应 WebDAV 响应 XML 顶层的 `<D:multistatus>` 节点
#[derive(Debug, Deserialize, Clone)]
pub struct MultiStatus {
    /// `<D:response>` 节点列表，每个 response 表示一个资源（文件或目录）
    #[serde(rename = "response", default)]
    pub responses: Vec<Response>,
}

/// 对应单个 `<D:response>` 节点
#[derive(Debug, Deserialize, Clone)]
pub struct Response {
    /// `<D:href>`：资源路径（URL 编码）
    pub href: String,
    /// `<D:propstat>`：属性集和对应状态码的列表
    #[serde(rename = "propstat", default)]
    pub propstats: Vec<PropStat>,
}

/// 一个属性集 + 对应的 HTTP 状态
#[derive(Debug, Deserialize, Clone)]
pub struct PropStat {
    pub prop: Prop,
    /// 如 "HTTP/1.1 200 OK"
    pub status: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Prop {
    #[serde(rename = "resourcetype")]
    pub resource_type: Option<ResourceType>,

    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResourceType {
    /// `<collection/>` 存在表示是目录，否则是文件
    #[serde(rename = "collection")]
    pub is_collection: Option<EmptyElement>,
}

/// 空元素的占位结构，例如 `<collection/>`
#[derive(Debug, Deserialize, Clone)]
pub struct EmptyElement {}
