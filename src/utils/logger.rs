use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter used when `RUST_LOG` is unset. Verbose runs show the stage-level
/// debug output of this crate; other crates stay at `warn` either way.
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{}={}", CRATE_TARGET, level)
}

/// Logs go to stderr so stdout stays clean for `--dry-run` JSON.
/// Returns `false` if a global subscriber was already installed.
pub fn init_cli_logger(verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                // module paths help tell stages apart in verbose output
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_targets_this_crate() {
        assert_eq!(default_filter(false), "warn,perf_report=info");
        assert_eq!(default_filter(true), "warn,perf_report=debug");
    }

    #[test]
    fn test_default_filters_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }

    #[test]
    fn test_second_init_is_reported() {
        init_cli_logger(false);
        assert!(!init_cli_logger(true));
    }
}
