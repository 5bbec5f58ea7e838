//! C header implementations.

pub mod errno;
pub mod sys_file;
