//! `sys/file.h` implementation.
//!
//! Non-POSIX, see <https://man7.org/linux/man-pages/man2/flock.2.html>.

use crate::{
    error::ResultExt,
    platform::{self, types::c_int, Pal, Sys},
};

pub const LOCK_SH: c_int = 1;
pub const LOCK_EX: c_int = 2;
pub const LOCK_NB: c_int = 4;
pub const LOCK_UN: c_int = 8;

pub const L_SET: c_int = 0;
pub const L_INCR: c_int = 1;
pub const L_XTND: c_int = 2;

CheckVsLibcCrate!(LOCK_SH, LOCK_EX, LOCK_NB, LOCK_UN);

/// See <https://man7.org/linux/man-pages/man2/flock.2.html>.
///
/// Returns `0` on success. On failure returns `-1` and sets errno: `EBADF`,
/// `EINVAL`, `EWOULDBLOCK` (with `LOCK_NB`), `EINTR`, `ENOLCK`, or `ENOSYS`
/// on targets without a lock facility.
///
/// Exported unmangled only with the `c_symbols` feature.
#[cfg_attr(feature = "c_symbols", unsafe(no_mangle))]
pub extern "C" fn flock(fd: c_int, operation: c_int) -> c_int {
    #[cfg(feature = "c_symbols")]
    platform::init();
    trace_expr!(
        Sys::flock(fd, operation).map(|()| 0).or_minus_one_errno(),
        "flock({}, {:#x})",
        fd,
        operation
    )
}
