//! Payload assembly: merging, cleaning and loading of request bodies.

pub mod merge;
pub mod options;
pub mod source;
