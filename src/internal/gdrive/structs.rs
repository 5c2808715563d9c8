pub mod drive_directory;
pub mod drive_file;

pub use drive_directory::DriveDirectory;
pub use drive_file::{DriveFile, DriveFileList};
