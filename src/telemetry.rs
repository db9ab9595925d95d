//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise the service and HTTP layer log at info.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("advert_service=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
