//! Error macros for tidypath

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::TidypathError::invalid_value($context, $value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::TidypathError::UsageError($msg.to_string()))
    };
}

/// Macro for creating unsupported errors
#[macro_export]
macro_rules! bail_unsupported {
    ($context:expr, $value:expr, $supported:expr) => {
        return Err($crate::error::TidypathError::unsupported(
            $context, $value, $supported,
        ))
    };
}

/// Macro for rejecting a call that does not bind to its signature
#[macro_export]
macro_rules! bail_call {
    ($function:expr, $($arg:tt)+) => {
        return Err($crate::error::TidypathError::invalid_call(
            $function,
            format!($($arg)+),
        ))
    };
}
