/// Conditional logging module for development builds
///
/// The `log!` macro provides informational console logging that is compiled out
/// in production (release) builds by default. Warnings and errors should continue
/// using `leptos::logging::warn!` and `leptos::logging::error!` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```rust
/// use network_map::log;
///
/// let section_id = "S99";
/// log!("Dropping train on unknown section {}", section_id);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            $crate::logging::console_log(&format!($($arg),+));
        }
    };
}

/// Write one line to the browser console, or stdout when running natively (tests, benches)
pub fn console_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    println!("{message}");
}
