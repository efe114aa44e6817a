//! Diagnostic logging setup for the binary
//!
//! Operator progress goes to stdout through the commands. This subscriber
//! only carries `tracing` events from the library, on stderr.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive, e.g. `pic32gen=debug`
pub const LOG_ENV: &str = "PIC32GEN_LOG";

/// Default filter for a `-v` count: warn, info, debug, then trace
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "pic32gen=info",
        2 => "pic32gen=debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `PIC32GEN_LOG` wins over `-v` when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "pic32gen=info");
        assert_eq!(default_directive(2), "pic32gen=debug");
        assert_eq!(default_directive(7), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
