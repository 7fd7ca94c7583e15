//! Unified test logging initialization
//!
//! Single source of truth for test logging initialization that works for
//! both unit tests and integration tests. A one-time guard prevents double
//! initialization and integrates cleanly with cargo output capture.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize structured logging for tests.
///
/// Idempotent and race-safe. The logging level is controlled in this
/// order of precedence:
///
/// 1. `TEST_LOG` environment variable (preferred)
/// 2. `RUST_LOG` environment variable (fallback)
/// 3. `"warn"` (default, quiet)
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // cargo output capture
            .without_time() // Stable output
            .try_init()
            .ok(); // Never panic if something else already initialized
    });
}
