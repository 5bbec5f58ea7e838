use sc::syscall;

use super::{types::*, Pal};
use crate::error::{Errno, Result};

/// Map a raw syscall return to a `Result`. Linux reports failure as
/// `-errno` in the top 4095 values.
pub fn e_raw(sys: usize) -> Result<usize> {
    if sys > -4096isize as usize {
        Err(Errno(-(sys as isize) as c_int))
    } else {
        Ok(sys)
    }
}

pub struct Sys;

impl Pal for Sys {
    fn flock(fd: c_int, operation: c_int) -> Result<()> {
        e_raw(unsafe { syscall!(FLOCK, fd, operation) }).map(|_| ())
    }
}
