//! `errno.h` subset used by `sys/file.h`.
//!
//! Numbering follows Linux, which Redox shares for this range.

use crate::platform::types::c_int;

/// Operation not permitted
pub const EPERM: c_int = 1;
/// No such file or directory
pub const ENOENT: c_int = 2;
/// No such process
pub const ESRCH: c_int = 3;
/// Interrupted system call
pub const EINTR: c_int = 4;
/// I/O error
pub const EIO: c_int = 5;
/// No such device or address
pub const ENXIO: c_int = 6;
/// Argument list too long
pub const E2BIG: c_int = 7;
/// Exec format error
pub const ENOEXEC: c_int = 8;
/// Bad file number
pub const EBADF: c_int = 9;
/// No child processes
pub const ECHILD: c_int = 10;
/// Try again
pub const EAGAIN: c_int = 11;
/// Out of memory
pub const ENOMEM: c_int = 12;
/// Permission denied
pub const EACCES: c_int = 13;
/// Bad address
pub const EFAULT: c_int = 14;
/// Block device required
pub const ENOTBLK: c_int = 15;
/// Device or resource busy
pub const EBUSY: c_int = 16;
/// File exists
pub const EEXIST: c_int = 17;
/// Cross-device link
pub const EXDEV: c_int = 18;
/// No such device
pub const ENODEV: c_int = 19;
/// Not a directory
pub const ENOTDIR: c_int = 20;
/// Is a directory
pub const EISDIR: c_int = 21;
/// Invalid argument
pub const EINVAL: c_int = 22;
/// File table overflow
pub const ENFILE: c_int = 23;
/// Too many open files
pub const EMFILE: c_int = 24;
/// Not a typewriter
pub const ENOTTY: c_int = 25;
/// Text file busy
pub const ETXTBSY: c_int = 26;
/// File too large
pub const EFBIG: c_int = 27;
/// No space left on device
pub const ENOSPC: c_int = 28;
/// Illegal seek
pub const ESPIPE: c_int = 29;
/// Read-only file system
pub const EROFS: c_int = 30;
/// Too many links
pub const EMLINK: c_int = 31;
/// Broken pipe
pub const EPIPE: c_int = 32;
/// Math argument out of domain of func
pub const EDOM: c_int = 33;
/// Math result not representable
pub const ERANGE: c_int = 34;
/// Resource deadlock would occur
pub const EDEADLK: c_int = 35;
/// File name too long
pub const ENAMETOOLONG: c_int = 36;
/// No record locks available
pub const ENOLCK: c_int = 37;
/// Function not implemented
pub const ENOSYS: c_int = 38;

/// Operation would block
pub const EWOULDBLOCK: c_int = EAGAIN;

pub const STR_ERROR: [&str; 39] = [
    "Success",
    "Operation not permitted",
    "No such file or directory",
    "No such process",
    "Interrupted system call",
    "I/O error",
    "No such device or address",
    "Argument list too long",
    "Exec format error",
    "Bad file descriptor",
    "No child processes",
    "Try again",
    "Out of memory",
    "Permission denied",
    "Bad address",
    "Block device required",
    "Device or resource busy",
    "File exists",
    "Cross-device link",
    "No such device",
    "Not a directory",
    "Is a directory",
    "Invalid argument",
    "File table overflow",
    "Too many open files",
    "Not a typewriter",
    "Text file busy",
    "File too large",
    "No space left on device",
    "Illegal seek",
    "Read-only file system",
    "Too many links",
    "Broken pipe",
    "Math argument out of domain of func",
    "Math result not representable",
    "Resource deadlock would occur",
    "File name too long",
    "No record locks available",
    "Function not implemented",
];

/// Description of `errnum`, if this table knows it.
pub fn strerror_str(errnum: c_int) -> Option<&'static str> {
    usize::try_from(errnum)
        .ok()
        .and_then(|i| STR_ERROR.get(i))
        .copied()
}

CheckVsLibcCrate!(EBADF, EINTR, EINVAL, EAGAIN, EWOULDBLOCK, ENOLCK, ENOSYS);

/// Address of the calling thread's errno.
///
/// Only exported with the `errno_symbol` feature: a process that also links
/// the host libc already has one.
#[cfg(feature = "errno_symbol")]
#[unsafe(no_mangle)]
pub extern "C" fn __errno_location() -> *mut c_int {
    crate::platform::ERRNO.as_ptr()
}
