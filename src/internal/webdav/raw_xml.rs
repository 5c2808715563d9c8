pub mod impl_multi_status;
pub mod raw_file;

pub use impl_multi_status::ToRemoteEntries;
pub use raw_file::*;
