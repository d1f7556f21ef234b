//! # wideprobe-trigger
//!
//! The raw libc call sequences behind the two probe binaries. Each module
//! is one linear trigger; both deliberately discard every return value so
//! the underlying library fault surfaces as-is (a crash, or leaked bytes)
//! instead of being caught and reported.

pub mod bound;
pub mod stomp;
