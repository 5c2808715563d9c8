pub mod error;
pub mod structs;
