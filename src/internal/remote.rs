//! 远程目录领域：核心（遍历器、执行器）只依赖本模块的 trait 与数据模型，
//! 具体的云存储实现见 `gdrive` 与 `webdav`。

pub mod enums;
pub mod error;
pub mod structs;
pub mod traits;
