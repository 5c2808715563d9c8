pub mod webdav_directory;

pub use webdav_directory::WebdavDirectory;
