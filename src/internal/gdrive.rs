//! Google Drive v3 实现：元数据与列表走 JSON 接口，内容走 `alt=media` 下载。

pub mod structs;
