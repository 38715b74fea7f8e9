//! Format-string emit macros.
//!
//! `info!("x = {}", x)` logs through the global logger; `info!(logger, "x = {}", x)`
//! through any `LeveledLogger`. When the level is disabled neither the
//! arguments nor the format string are evaluated.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::LeveledLogger = $logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_fmt(level, ::std::format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_at!($crate::logger(), $crate::Level::Debug, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(&$logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_at!($crate::logger(), $crate::Level::Info, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(&$logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_at!($crate::logger(), $crate::Level::Warn, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(&$logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_at!($crate::logger(), $crate::Level::Error, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_at!(&$logger, $crate::Level::Error, $($arg)+)
    };
}
