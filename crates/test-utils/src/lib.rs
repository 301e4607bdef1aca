//! Shared helpers for `forgeexe` integration tests.

pub mod builders;
pub mod events;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use forgeexe::logging::LOG_ENV_VAR;
use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for anything a test awaits on.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness's capture.
///
/// Output only shows up for failing tests (or with `--nocapture`). The
/// level is read from `FORGEEXE_LOG`, e.g. `FORGEEXE_LOG=debug`, and
/// defaults to `warn` so passing runs stay quiet.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test timed out after {TEST_TIMEOUT:?}"),
    }
}
