//! 下载配置：TOML 文件 < 环境变量 < 命令行，逐层覆盖后解析为一次运行所需的参数。

pub mod enums;
pub mod error;
pub mod structs;
