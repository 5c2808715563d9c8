pub mod write_stream;

pub(crate) use write_stream::write_stream;
