pub mod local_path;

pub use local_path::{sanitize_segment, LocalPathAllocator};
