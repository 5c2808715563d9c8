//! 任务列表：一次运行唯一的持久化状态，支持中断后续传。
//!
//! 文档格式为 JSON 数组，每项 `{"id", "path", "md5", "done"}`，保持人类可读，
//! 用户可以在两次运行之间手动编辑或删减。

pub mod error;
pub mod structs;
