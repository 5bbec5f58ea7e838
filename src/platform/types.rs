// C scalar types of the targets this crate builds for.

pub type c_int = i32;
