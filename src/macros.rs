// Crate-internal logging. Routes to `log` or `defmt` when one of those
// features is enabled and compiles to nothing otherwise.

#[cfg(feature = "log")]
macro_rules! pixelbuf_log {
    (trace, $($arg:expr),*) => { log::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { log::debug!($($arg),*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! pixelbuf_log {
    (trace, $($arg:expr),*) => { defmt::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { defmt::debug!($($arg),*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! pixelbuf_log {
    ($level:ident, $($arg:expr),*) => {{ $( let _ = &$arg; )* }};
}

macro_rules! pixelbuf_trace {
    ($($arg:expr),*) => (pixelbuf_log!(trace, $($arg),*));
}

macro_rules! pixelbuf_debug {
    ($($arg:expr),*) => (pixelbuf_log!(debug, $($arg),*));
}
