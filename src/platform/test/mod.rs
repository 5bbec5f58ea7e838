use std::os::fd::AsRawFd;

use crate::{
    error::Errno,
    header::{
        errno::{EBADF, EWOULDBLOCK},
        sys_file::{LOCK_EX, LOCK_NB, LOCK_SH, LOCK_UN},
    },
    platform::{Pal, Sys},
};

#[cfg(target_os = "linux")]
fn reopen(file: &tempfile::NamedTempFile) -> std::fs::File {
    std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(file.path())
        .unwrap()
}

#[test]
fn flock_bad_fd() {
    assert_eq!(Sys::flock(-1, LOCK_SH), Err(Errno(EBADF)));
    assert_eq!(Sys::flock(-1, LOCK_EX | LOCK_NB), Err(Errno(EBADF)));
}

#[cfg(target_os = "linux")]
#[test]
fn flock_upgrade_same_fd() {
    let file = tempfile::tempfile().unwrap();
    let fd = file.as_raw_fd();

    assert_eq!(Sys::flock(fd, LOCK_SH), Ok(()));
    assert_eq!(Sys::flock(fd, LOCK_EX), Ok(()));
    assert_eq!(Sys::flock(fd, LOCK_SH), Ok(()));
    assert_eq!(Sys::flock(fd, LOCK_UN), Ok(()));
}

#[cfg(target_os = "linux")]
#[test]
fn flock_unlock_without_lock() {
    let file = tempfile::tempfile().unwrap();
    assert_eq!(Sys::flock(file.as_raw_fd(), LOCK_UN), Ok(()));
}

#[cfg(target_os = "linux")]
#[test]
fn flock_conflict() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let a = reopen(&file);
    let b = reopen(&file);

    assert_eq!(Sys::flock(a.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
    assert_eq!(
        Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB),
        Err(Errno(EWOULDBLOCK))
    );
    assert_eq!(
        Sys::flock(b.as_raw_fd(), LOCK_SH | LOCK_NB),
        Err(Errno(EWOULDBLOCK))
    );

    assert_eq!(Sys::flock(a.as_raw_fd(), LOCK_UN), Ok(()));
    assert_eq!(Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
}

#[cfg(target_os = "linux")]
#[test]
fn flock_shared_coexist() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let a = reopen(&file);
    let b = reopen(&file);

    assert_eq!(Sys::flock(a.as_raw_fd(), LOCK_SH | LOCK_NB), Ok(()));
    assert_eq!(Sys::flock(b.as_raw_fd(), LOCK_SH | LOCK_NB), Ok(()));
    assert_eq!(
        Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB),
        Err(Errno(EWOULDBLOCK))
    );
}

#[cfg(target_os = "linux")]
#[test]
fn flock_dup_shares_lock() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let a = reopen(&file);
    let a_dup = a.try_clone().unwrap();
    let b = reopen(&file);

    assert_eq!(Sys::flock(a.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
    // Same open file description, so no conflict.
    assert_eq!(Sys::flock(a_dup.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
    assert_eq!(
        Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB),
        Err(Errno(EWOULDBLOCK))
    );

    // Releasing through either descriptor releases the description's lock.
    assert_eq!(Sys::flock(a_dup.as_raw_fd(), LOCK_UN), Ok(()));
    assert_eq!(Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
}

#[cfg(target_os = "linux")]
#[test]
fn flock_released_on_close() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let a = reopen(&file);
    let b = reopen(&file);

    assert_eq!(Sys::flock(a.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
    drop(a);
    assert_eq!(Sys::flock(b.as_raw_fd(), LOCK_EX | LOCK_NB), Ok(()));
}
