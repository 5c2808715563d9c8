pub mod propfind;

pub(crate) use propfind::propfind;
