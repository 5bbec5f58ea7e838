//! Typed advisory locks for Rust callers.
//!
//! [`flock`] is the checked counterpart of the C entry point: it returns the
//! error instead of stashing it in errno. [`FileLock`] holds a lock for as
//! long as it lives.

use core::{fmt, mem::ManuallyDrop, ptr};
use std::os::fd::AsRawFd;

use crate::{
    error::{Errno, Result},
    header::{
        errno::EINVAL,
        sys_file::{LOCK_EX, LOCK_NB, LOCK_SH, LOCK_UN},
    },
    platform::{types::c_int, Pal, Sys},
};

bitflags::bitflags! {
    /// The `operation` argument of `flock`.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct LockOperation: c_int {
        const SHARED = LOCK_SH;
        const EXCLUSIVE = LOCK_EX;
        const NONBLOCK = LOCK_NB;
        const UNLOCK = LOCK_UN;
    }
}

impl LockOperation {
    /// Exactly one of `SHARED`, `EXCLUSIVE` or `UNLOCK`, optionally with
    /// `NONBLOCK`, and nothing else.
    pub fn is_well_formed(self) -> bool {
        let kind = self.difference(Self::NONBLOCK);
        kind == Self::SHARED || kind == Self::EXCLUSIVE || kind == Self::UNLOCK
    }
}

/// Apply `operation` to the open file description behind `fd`.
///
/// Malformed operations fail with `EINVAL` without reaching the platform.
pub fn flock<F: AsRawFd + ?Sized>(fd: &F, operation: LockOperation) -> Result<()> {
    flock_on::<Sys, F>(fd, operation)
}

fn flock_on<P: Pal, F: AsRawFd + ?Sized>(fd: &F, operation: LockOperation) -> Result<()> {
    if !operation.is_well_formed() {
        return Err(Errno(EINVAL));
    }
    P::flock(fd.as_raw_fd(), operation.bits())
}

/// Like [`flock`], but restarts the call when a signal interrupts the wait.
fn flock_restarting<P: Pal, F: AsRawFd + ?Sized>(fd: &F, operation: LockOperation) -> Result<()> {
    loop {
        match flock_on::<P, F>(fd, operation) {
            Err(err) if err.interrupted() => {
                log::trace!("flock({}, {:?}) interrupted, retrying", fd.as_raw_fd(), operation);
            }
            res => return res,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

impl LockMode {
    fn operation(self) -> LockOperation {
        match self {
            LockMode::Shared => LockOperation::SHARED,
            LockMode::Exclusive => LockOperation::EXCLUSIVE,
        }
    }
}

/// A held `flock` lock. Released when dropped.
///
/// The lock belongs to the open file description, so other descriptors
/// duplicated from `file` share it, and closing all of them releases it too.
pub struct FileLock<T: AsRawFd> {
    file: T,
    mode: Option<LockMode>,
}

impl<T: AsRawFd> FileLock<T> {
    /// Block until a shared lock is granted.
    pub fn lock_shared(file: T) -> Result<Self> {
        Self::acquire(file, LockMode::Shared, true)
    }

    /// Block until an exclusive lock is granted.
    pub fn lock_exclusive(file: T) -> Result<Self> {
        Self::acquire(file, LockMode::Exclusive, true)
    }

    /// Fails with `EWOULDBLOCK` instead of waiting (see [`Errno::would_block`]).
    pub fn try_lock_shared(file: T) -> Result<Self> {
        Self::acquire(file, LockMode::Shared, false)
    }

    /// Fails with `EWOULDBLOCK` instead of waiting (see [`Errno::would_block`]).
    pub fn try_lock_exclusive(file: T) -> Result<Self> {
        Self::acquire(file, LockMode::Exclusive, false)
    }

    fn acquire(file: T, mode: LockMode, block: bool) -> Result<Self> {
        if block {
            flock_restarting::<Sys, T>(&file, mode.operation())?;
        } else {
            flock(&file, mode.operation() | LockOperation::NONBLOCK)?;
        }
        log::debug!("fd {} locked {:?}", file.as_raw_fd(), mode);
        Ok(Self {
            file,
            mode: Some(mode),
        })
    }

    /// `None` once a failed conversion has cost the guard its lock. Any of
    /// the conversion methods can take a lock again.
    pub fn mode(&self) -> Option<LockMode> {
        self.mode
    }

    pub fn get_ref(&self) -> &T {
        &self.file
    }

    /// Convert to an exclusive lock, waiting if needed.
    ///
    /// The host may drop the shared lock before granting the exclusive one,
    /// so another process can get in between.
    pub fn upgrade(&mut self) -> Result<()> {
        self.convert_on::<Sys>(LockMode::Exclusive, true)
    }

    /// On failure the previous lock is re-requested without waiting; if that
    /// fails too, [`mode`](Self::mode) turns `None`.
    pub fn try_upgrade(&mut self) -> Result<()> {
        self.convert_on::<Sys>(LockMode::Exclusive, false)
    }

    pub fn downgrade(&mut self) -> Result<()> {
        self.convert_on::<Sys>(LockMode::Shared, true)
    }

    fn convert_on<P: Pal>(&mut self, mode: LockMode, block: bool) -> Result<()> {
        if self.mode == Some(mode) {
            return Ok(());
        }
        let res = if block {
            flock_restarting::<P, T>(&self.file, mode.operation())
        } else {
            flock_on::<P, T>(&self.file, mode.operation() | LockOperation::NONBLOCK)
        };
        if let Err(err) = res {
            // Linux drops the old lock before it finds the conflict.
            if let Some(held) = self.mode {
                let restore = held.operation() | LockOperation::NONBLOCK;
                if let Err(restore_err) = flock_on::<P, T>(&self.file, restore) {
                    log::warn!(
                        "fd {} lost its {:?} lock: {}",
                        self.file.as_raw_fd(),
                        held,
                        restore_err
                    );
                    self.mode = None;
                }
            }
            return Err(err);
        }
        log::debug!("fd {} converted {:?} -> {:?}", self.file.as_raw_fd(), self.mode, mode);
        self.mode = Some(mode);
        Ok(())
    }

    /// Release the lock and hand the file back.
    pub fn unlock(self) -> Result<T> {
        let this = ManuallyDrop::new(self);
        let res = flock(&this.file, LockOperation::UNLOCK);
        // SAFETY: `this` is never used or dropped again, so the file is moved
        // out exactly once.
        let file = unsafe { ptr::read(&this.file) };
        res.map(|()| file)
    }
}

impl<T: AsRawFd> Drop for FileLock<T> {
    fn drop(&mut self) {
        if self.mode.is_none() {
            return;
        }
        if let Err(err) = flock(&self.file, LockOperation::UNLOCK) {
            log::warn!("failed to unlock fd {}: {}", self.file.as_raw_fd(), err);
        }
    }
}

impl<T: AsRawFd> fmt::Debug for FileLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FileLock")
            .field("fd", &self.file.as_raw_fd())
            .field("mode", &self.mode)
            .finish()
    }
}
