//! Caching of parsed build files between discovery passes

pub mod parse_cache;

pub use parse_cache::ParseCache;
