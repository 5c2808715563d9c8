//! 远程名称到本地路径的映射。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// 把远程显示名转换为单个安全的路径段。
///
/// 分隔符替换为 `_`，空名、`.`、`..` 替换为 `_`，避免写出目标目录之外。
pub fn sanitize_segment(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
        .collect();

    match replaced.trim() {
        "" | "." | ".." => "_".to_string(),
        _ => replaced,
    }
}

/// 分配唯一的本地路径：同一父目录下重名的条目依次追加 ` (1)`、` (2)`……
#[derive(Debug, Default)]
pub struct LocalPathAllocator {
    claimed: HashSet<PathBuf>,
}

impl LocalPathAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个已占用的路径（根路径）
    pub fn reserve(&mut self, path: &Path) {
        self.claimed.insert(path.to_path_buf());
    }

    pub fn allocate(&mut self, parent: &Path, name: &str) -> PathBuf {
        let segment = sanitize_segment(name);
        let candidate = parent.join(&segment);
        if self.claimed.insert(candidate.clone()) {
            return candidate;
        }

        let (stem, extension) = split_extension(&segment);
        let mut n = 1usize;
        loop {
            let candidate = parent.join(format!("{stem} ({n}){extension}"));
            if self.claimed.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// `report.tar.gz` -> (`report.tar`, `.gz`)；隐藏文件 `.env` 视为没有扩展名
fn split_extension(segment: &str) -> (&str, &str) {
    match segment.rfind('.') {
        Some(index) if index > 0 => segment.split_at(index),
        _ => (segment, ""),
    }
}
