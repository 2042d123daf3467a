//! Contact book persisted as a single JSON array on disk.
//!
//! Every operation reads the whole list fresh from storage. Mutations
//! validate first, then rewrite the file atomically while holding both an
//! in-process writer gate and an advisory file lock.

pub mod config;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod store;
