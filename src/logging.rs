// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber, written to stderr so stdout stays
// free for the --json report
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Switches the output to one JSON object per line when set to "json"
pub const LOG_FORMAT_ENV: &str = "LESSON_AUDIT_LOG_FORMAT";

/// Initialize logging
///
/// # Environment
/// - RUST_LOG: level filter (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=lesson_audit=trace,perf=debug
/// - LESSON_AUDIT_LOG_FORMAT: "json" for structured output
///
/// # Example
/// ```no_run
/// use lesson_audit::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    if wants_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// Logging for tests: debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

fn wants_json(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_json() {
        assert!(wants_json(Some("json")));
        assert!(wants_json(Some(" JSON ")));
        assert!(!wants_json(Some("text")));
        assert!(!wants_json(None));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_test();
        init();
    }
}
