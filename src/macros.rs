// Logging is forwarded to the `log` facade only with the `logging` feature.

macro_rules! ring_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        log::trace!(target: "psycle", $($arg)*);
    }};
}

macro_rules! ring_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "logging")]
        log::debug!(target: "psycle", $($arg)*);
    }};
}
