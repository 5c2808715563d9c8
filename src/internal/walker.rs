//! 远程目录树的广度优先遍历，把一个根 id 展开为扁平的任务列表。

pub mod error;
pub mod functions;
pub mod structs;
