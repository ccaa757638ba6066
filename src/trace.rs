//! Rebalancing events, emitted through `tracing` when the `tracing` feature
//! is enabled and compiled out otherwise.

#[cfg(feature = "tracing")]
macro_rules! rb_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! rb_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! rb_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! rb_debug {
    ($($arg:tt)*) => {};
}
