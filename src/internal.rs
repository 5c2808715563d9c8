//! 内部实现：按领域划分模块，对外导出统一由 `lib.rs` 负责。

pub mod auth;
pub mod config;
pub mod entrance;
pub mod fingerprint;
pub mod gdrive;
pub mod logging;
pub mod remote;
pub mod task_list;
pub mod transfer;
pub mod walker;
pub mod webdav;
