//! `sys/file.h` for a minimal C library surface.
//!
//! The C entry points live in [`header`], one module per C header. They
//! report failure the C way (`-1` and `errno`); everything below them works
//! with [`error::Result`].

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(non_camel_case_types)]

#[macro_use]
pub mod macros;

pub mod error;
pub mod header;
#[cfg(unix)]
pub mod lock;
pub mod platform;

pub use crate::error::{Errno, Result};
#[cfg(unix)]
pub use crate::lock::{FileLock, LockMode, LockOperation};
