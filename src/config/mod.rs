//! Request model: hook arguments, list broadcasting, encoder options.

pub(crate) mod args;
pub(crate) mod broadcast;
pub(crate) mod encoder;
pub(crate) mod request;
