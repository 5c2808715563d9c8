pub mod backend_settings;
pub mod download_settings;

pub use backend_settings::BackendSettings;
pub use download_settings::{DownloadSettings, ResolvedDownload};
