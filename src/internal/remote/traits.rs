pub mod remote_directory;

pub use remote_directory::{ContentStream, RemoteDirectory};
