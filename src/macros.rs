#[macro_export]
#[cfg(feature = "no_trace")]
macro_rules! trace_expr {
    ($expr:expr, $($arg:tt)*) => {
        $expr
    };
}

#[macro_export]
#[cfg(not(feature = "no_trace"))]
macro_rules! trace_expr {
    ($expr:expr, $($arg:tt)*) => ({
        use $crate::header::errno::strerror_str;
        use $crate::platform;

        log::trace!("{}", format_args!($($arg)*));

        let trace_old_errno = platform::ERRNO.get();
        platform::ERRNO.set(0);

        let ret = $expr;

        let trace_errno = platform::ERRNO.get();
        if trace_errno == 0 {
            platform::ERRNO.set(trace_old_errno);
        }

        let trace_strerror = strerror_str(trace_errno).unwrap_or("Unknown error");

        log::trace!("{} = {} ({}, {})", format_args!($($arg)*), ret, trace_errno, trace_strerror);

        ret
    });
}

/// Compile-time check that a constant matches the one the `libc` crate
/// publishes for the host.
#[macro_export]
#[cfg(all(feature = "check_against_libc_crate", target_os = "linux"))]
macro_rules! CheckVsLibcCrate {
    ($($name:ident),* $(,)?) => {
        #[allow(dead_code)]
        const _: () = {
            $(
                if $name != ::libc::$name {
                    panic!(concat!("constant mismatch: ", stringify!($name)));
                }
            )*
        };
    };
}

#[macro_export]
#[cfg(not(all(feature = "check_against_libc_crate", target_os = "linux")))]
macro_rules! CheckVsLibcCrate {
    ($($name:ident),* $(,)?) => {};
}
