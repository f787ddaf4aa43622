//! ---
//! pcw_section: "03-logging"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Structured logging adapters and sinks."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
//! Context-enriched logging macros.

#[doc(hidden)]
#[macro_export]
macro_rules! __pw_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            directory = ctx.directory.unwrap_or(""),
            language = ctx.language.unwrap_or(""),
            stage = ctx.stage.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with batch context.
#[macro_export]
macro_rules! pw_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with batch context.
#[macro_export]
macro_rules! pw_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with batch context.
#[macro_export]
macro_rules! pw_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with batch context.
#[macro_export]
macro_rules! pw_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__pw_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
