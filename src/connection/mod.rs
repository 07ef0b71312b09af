pub(crate) mod connect;
pub(crate) mod frame;
pub(crate) mod parse;
