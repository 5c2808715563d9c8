pub mod remote_entry;

pub use remote_entry::{RemoteEntry, RemotePage};
