/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口函数
pub use internal::entrance::mirror::*;

pub mod auth {
    use crate::internal;
    pub use internal::auth::error::AuthError;
    pub use internal::auth::structs::drive_auth::DRIVE_API_BASE;
    pub use internal::auth::structs::{DriveAuth, WebdavAuth};
}

/// 远程目录抽象，核心只依赖这里的 trait，自定义服务实现它即可接入
pub mod remote {
    use crate::internal;
    pub use internal::remote::enums::EntryKind;
    pub use internal::remote::error::RemoteError;
    pub use internal::remote::structs::{RemoteEntry, RemotePage};
    pub use internal::remote::traits::{ContentStream, RemoteDirectory};
}

pub mod gdrive {
    use crate::internal;
    pub use internal::gdrive::structs::*;
}

/// 对外提供webdav基础访问能力，不能限制死在入口函数中，以防有人自己要用
pub mod webdav {
    pub mod enums {
        use crate::internal;
        pub use internal::webdav::enums::*;
    }

    pub mod structs {
        use crate::internal;
        pub use internal::webdav::raw_xml::*;
    }

    use crate::internal;
    pub use internal::webdav::structs::WebdavDirectory;
}

pub mod fingerprint {
    use crate::internal;
    pub use internal::fingerprint::*;
}

pub mod task_list {
    use crate::internal;
    pub use internal::task_list::error::StoreError;
    pub use internal::task_list::structs::task::count_done;
    pub use internal::task_list::structs::{Task, TaskListStore};
}

pub mod walker {
    use crate::internal;
    pub use internal::walker::error::WalkError;
    pub use internal::walker::functions::{sanitize_segment, LocalPathAllocator};
    pub use internal::walker::structs::{TreeWalker, DEFAULT_PAGE_SIZE};
}

pub mod transfer {
    use crate::internal;
    pub use internal::transfer::enums::{FailurePolicy, TaskOutcome};
    pub use internal::transfer::error::{TaskError, TransferError};
    pub use internal::transfer::structs::transfer_config::{
        DEFAULT_BACKOFF_UNIT, DEFAULT_CHECKPOINT_EVERY, DEFAULT_MAX_ATTEMPTS,
    };
    pub use internal::transfer::structs::*;
}

pub mod config {
    use crate::internal;
    pub use internal::config::enums::Backend;
    pub use internal::config::error::ConfigError;
    pub use internal::config::structs::download_settings::{
        default_list_path, DEFAULT_CONFIG_FILE,
    };
    pub use internal::config::structs::*;
}

pub mod logging {
    use crate::internal;
    pub use internal::logging::*;
}
