//! Animated solar-system diagram: body data in, per-tick positions out.
//!
//! The workspace crates are re-exported here so front-ends and integration tests can use
//! a single dependency. Rendering is left to whatever implements
//! [`scheduler::RenderSink`].

pub use orrery_bodies as bodies;
pub use orrery_config as config;
pub use orrery_core as core;
pub use orrery_export as export;
pub use orrery_orbits as orbits;
pub use orrery_scheduler as scheduler;
pub use orrery_session as session;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install the stderr log subscriber used by the binaries. Filtered with `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
}
