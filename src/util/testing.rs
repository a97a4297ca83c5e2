//! Test logging
//!
//! Unit and integration tests call [`init_test_setup`] to see the crate's
//! tracing output. `RUST_LOG` overrides the default `rsforest=debug`.

use std::sync::Once;

use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_TEST_FILTER: &str = "rsforest=debug";

static TEST_LOGGING: Once = Once::new();

/// Install the test subscriber; later calls are no-ops.
pub fn init_test_setup() {
    TEST_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        // Another harness may own the global dispatcher already
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging not installed: {e}");
        }
        tracing::debug!("test logging ready");
    });
}
