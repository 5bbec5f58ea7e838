use super::types::*;
use crate::error::Result;

pub trait Pal {
    /// Apply or remove an advisory lock on the open file description behind
    /// `fd`. `operation` is passed through unvalidated; the platform rejects
    /// what it does not understand.
    fn flock(fd: c_int, operation: c_int) -> Result<()>;
}
