//! WebDAV 实现：`PROPFIND` 读取目录，`GET` 读取文件内容。
//!
//! 条目 id 为相对于认证结构体中 `base_url` 的路径（保持 URL 编码），根目录为空串。

pub mod enums;
pub mod functions;
pub mod raw_xml;
pub mod structs;
