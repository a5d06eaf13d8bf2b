//! Headless end-to-end fixture: drives the backend through the async-resource store.
pub mod config;
pub mod driver;
pub mod effects;
pub mod logging;
pub mod render;

use fixture_client::{ClientError, ClientHandle};
use fixture_core::Store;
use fixture_logging::fixture_info;

pub use config::{ConfigError, FixtureConfig};
pub use driver::{Driver, DriverOptions, RunReport};
pub use effects::{EffectRunner, Lane};

/// Wires store, client and renderer for one run.
pub fn build_driver(config: &FixtureConfig) -> Result<Driver, ClientError> {
    let client = ClientHandle::new(config.client_settings())?;
    let mut store = Store::new();
    let mut last_summary = String::new();
    store.subscribe(move |state| {
        let summary = render::summary_line(&state.view());
        if summary != last_summary {
            fixture_info!("{}", summary);
            last_summary = summary;
        }
    });

    let options = DriverOptions {
        settle_timeout: config.settle_timeout(),
        message_text: config.message_text.clone(),
        logout_at_end: config.logout_at_end,
    };
    Ok(Driver::new(store, EffectRunner::new(client), options))
}
