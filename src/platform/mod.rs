use core::cell::Cell;
use std::sync::Once;

use self::types::c_int;

pub use self::pal::Pal;

mod pal;

pub use self::sys::Sys;

#[cfg(target_os = "linux")]
#[path = "linux/mod.rs"]
mod sys;

#[cfg(not(target_os = "linux"))]
#[path = "unsupported/mod.rs"]
mod sys;

// Built everywhere so the fallback stays tested on hosts that have flock.
#[cfg(all(test, target_os = "linux"))]
#[path = "unsupported/mod.rs"]
mod unsupported;

#[cfg(test)]
mod test;

pub mod logger;

pub mod types;

std::thread_local! {
    static ERRNO_SLOT: Cell<c_int> = const { Cell::new(0) };
}

/// The calling thread's errno, as seen by the C entry points.
///
/// Next to a host libc this is the host's errno, so C callers find failures
/// where they expect them. With `errno_symbol`, or on targets whose libc
/// errno accessor is unknown, the crate keeps its own.
pub struct ErrnoCell;

pub static ERRNO: ErrnoCell = ErrnoCell;

impl ErrnoCell {
    pub fn get(&self) -> c_int {
        // SAFETY: `as_ptr` points at the calling thread's errno.
        unsafe { *self.as_ptr() }
    }

    pub fn set(&self, errno: c_int) {
        // SAFETY: as above.
        unsafe { *self.as_ptr() = errno }
    }

    /// Stable for the lifetime of the calling thread.
    pub fn as_ptr(&self) -> *mut c_int {
        host_errno_location().unwrap_or_else(|| ERRNO_SLOT.with(Cell::as_ptr))
    }
}

#[cfg(all(
    not(feature = "errno_symbol"),
    any(target_os = "linux", target_os = "redox")
))]
fn host_errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__errno_location() })
}

#[cfg(all(
    not(feature = "errno_symbol"),
    any(
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "dragonfly"
    )
))]
fn host_errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__error() })
}

#[cfg(all(
    not(feature = "errno_symbol"),
    any(target_os = "android", target_os = "netbsd", target_os = "openbsd")
))]
fn host_errno_location() -> Option<*mut c_int> {
    Some(unsafe { libc::__errno() })
}

#[cfg(not(all(
    not(feature = "errno_symbol"),
    any(
        target_os = "linux",
        target_os = "redox",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "android",
        target_os = "netbsd",
        target_os = "openbsd"
    )
)))]
fn host_errno_location() -> Option<*mut c_int> {
    None
}

static INIT: Once = Once::new();

/// Install the stderr logger the first time an exported C entry point runs.
///
/// Only called from unmangled symbols, so Rust callers keep their own `log`
/// backend.
pub fn init() {
    INIT.call_once(logger::init);
}
