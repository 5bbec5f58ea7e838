//! Fallback for targets without an advisory lock facility.
//!
//! The operation is checked first and the descriptor second, in the order
//! Linux checks them, then every well-formed request fails with `ENOSYS`.
//! Nothing ever blocks, so a shared request followed by an exclusive one is
//! rejected rather than left waiting.

use super::{types::*, Pal};
use crate::{
    error::{Errno, Result},
    header::{
        errno::{EBADF, EINVAL, ENOSYS},
        sys_file::{LOCK_EX, LOCK_NB, LOCK_SH, LOCK_UN},
    },
};

pub struct Sys;

impl Pal for Sys {
    fn flock(fd: c_int, operation: c_int) -> Result<()> {
        match operation & !LOCK_NB {
            LOCK_SH | LOCK_EX | LOCK_UN => (),
            _ => return Err(Errno(EINVAL)),
        }
        if fd < 0 {
            return Err(Errno(EBADF));
        }
        log::debug!("flock({fd}, {operation:#x}): no lock facility on this target");
        Err(Errno(ENOSYS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_fd() {
        assert_eq!(Sys::flock(-1, LOCK_SH), Err(Errno(EBADF)));
        assert_eq!(Sys::flock(-1, LOCK_UN | LOCK_NB), Err(Errno(EBADF)));
    }

    #[test]
    fn operation_checked_before_fd() {
        assert_eq!(Sys::flock(-1, 0), Err(Errno(EINVAL)));
        assert_eq!(Sys::flock(-1, LOCK_SH | LOCK_EX), Err(Errno(EINVAL)));
    }

    #[test]
    fn malformed_operation() {
        for op in [0, LOCK_NB, LOCK_SH | LOCK_EX, LOCK_EX | LOCK_UN, 0x100] {
            assert_eq!(Sys::flock(0, op), Err(Errno(EINVAL)), "operation {op:#x}");
        }
    }

    #[test]
    fn well_formed_is_unsupported() {
        for op in [LOCK_SH, LOCK_EX, LOCK_UN, LOCK_SH | LOCK_NB, LOCK_EX | LOCK_NB] {
            assert_eq!(Sys::flock(0, op), Err(Errno(ENOSYS)), "operation {op:#x}");
        }
    }

    #[test]
    fn shared_then_exclusive_returns() {
        assert_eq!(Sys::flock(3, LOCK_SH), Err(Errno(ENOSYS)));
        assert_eq!(Sys::flock(3, LOCK_EX), Err(Errno(ENOSYS)));
    }
}
