//! 任务列表执行器：逐个下载、重试退避、指纹校验、定期落盘检查点。
//!
//! 单工作者顺序执行，没有任何并发下载。

pub mod enums;
pub mod error;
pub mod functions;
pub mod structs;
