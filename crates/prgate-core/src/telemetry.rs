//! Log subscriber setup for the `prgate` binary.
//!
//! Filter precedence: `PRGATE_LOG`, then `RUST_LOG`, then the CLI level.
//! The HTTP stack behind the GitHub adapter is capped at `warn` unless a
//! filter variable says otherwise, so `--verbose` shows validation detail
//! rather than connection chatter.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "PRGATE_LOG";

const QUIET_DEPENDENCIES: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// Filter directives used when no filter variable is set.
pub fn default_directives(level: Level) -> String {
    let mut directives = level.as_str().to_lowercase();
    for target in QUIET_DEPENDENCIES {
        directives.push_str(&format!(",{target}=warn"));
    }
    directives
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if json {
        registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };
    if installed.is_ok() {
        tracing::debug!(json, level = %level, "tracing initialised");
    }
}
