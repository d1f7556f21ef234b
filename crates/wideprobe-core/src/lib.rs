//! # wideprobe-core
//!
//! Safe Rust models shared by the wideprobe trigger binaries and harness.
//!
//! The trigger binaries exercise glibc's wide-character I/O paths with raw
//! libc calls; this crate holds the pure-logic side: wide buffer helpers,
//! a reference model of `wcstombs` under a UTF-8 locale, and the probe
//! catalog the harness runs against. No `unsafe` code is permitted at the
//! crate level.

#![deny(unsafe_code)]

pub mod catalog;
pub mod convert;
pub mod wide;
