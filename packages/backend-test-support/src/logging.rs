//! Test logging initialisation.
//!
//! Shared by the backend's unit tests (through a `ctor` in `lib.rs`) and each
//! integration test binary (through `tests/common`). A one-time guard makes
//! repeated calls harmless.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.
///
/// ```bash
/// TEST_LOG=coffee_backend=debug cargo test -p coffee-backend
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
