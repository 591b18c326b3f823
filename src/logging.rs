use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "dirdiff=warn",
        1 => "dirdiff=info",
        2 => "dirdiff=debug",
        _ => "dirdiff=trace",
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity count. Later calls are no-ops.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0), "dirdiff=warn");
        assert_eq!(default_directive(2), "dirdiff=debug");
        assert_eq!(default_directive(9), "dirdiff=trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0);
        init(3);
    }
}
