//! Animation encoding.
//!
//! Frames are read back from disk in time order and pushed into a [`sink::FrameSink`].

/// Frame files → animation, plus frame cleanup.
pub mod assemble;
/// GIF sink built on the `gif` crate.
pub mod gif;
/// Generic frame sink trait and the in-memory test sink.
pub mod sink;
