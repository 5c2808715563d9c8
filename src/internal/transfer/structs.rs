pub mod transfer_config;
pub mod transfer_executor;
pub mod transfer_summary;

pub use transfer_config::TransferConfig;
pub use transfer_executor::TransferExecutor;
pub use transfer_summary::{FailedTask, TransferSummary};
