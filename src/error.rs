use crate::{
    header::errno::{strerror_str, EAGAIN, EINTR, EWOULDBLOCK},
    platform::types::c_int,
};

/// Positive error codes (EINVAL, not -EINVAL).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Errno(pub c_int);

pub type Result<T, E = Errno> = core::result::Result<T, E>;

impl Errno {
    /// `LOCK_NB` was set and a conflicting lock is held.
    pub fn would_block(self) -> bool {
        self.0 == EWOULDBLOCK || self.0 == EAGAIN
    }

    pub fn interrupted(self) -> bool {
        self.0 == EINTR
    }
}

impl From<Errno> for std::io::Error {
    #[inline]
    fn from(Errno(errno): Errno) -> Self {
        Self::from_raw_os_error(errno)
    }
}

impl core::fmt::Display for Errno {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match strerror_str(self.0) {
            Some(desc) => write!(f, "{desc}"),
            None => write!(f, "unknown error ({})", self.0),
        }
    }
}

impl std::error::Error for Errno {}

pub trait ResultExt<T> {
    fn or_minus_one_errno(self) -> T;
}
impl<T: From<i8>> ResultExt<T> for Result<T, Errno> {
    fn or_minus_one_errno(self) -> T {
        match self {
            Self::Ok(v) => v,
            Self::Err(Errno(errno)) => {
                crate::platform::ERRNO.set(errno);
                T::from(-1)
            }
        }
    }
}
