//! Logging shims.
//!
//! With the `tracing` feature the macros forward to `tracing`; without it they
//! still type-check their format arguments but emit nothing.

macro_rules! nav_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)*);
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! nav_trace {
    ($($arg:tt)*) => {
        $crate::log::nav_log!(trace, $($arg)*)
    };
}

macro_rules! nav_debug {
    ($($arg:tt)*) => {
        $crate::log::nav_log!(debug, $($arg)*)
    };
}

macro_rules! nav_error {
    ($($arg:tt)*) => {
        $crate::log::nav_log!(error, $($arg)*)
    };
}

pub(crate) use nav_debug;
pub(crate) use nav_error;
pub(crate) use nav_log;
pub(crate) use nav_trace;
