//! Generic structures.

pub mod luby;
