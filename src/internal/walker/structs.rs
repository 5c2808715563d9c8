pub mod tree_walker;

pub use tree_walker::{TreeWalker, DEFAULT_PAGE_SIZE};
