use std::process::ExitCode;

use anyhow::Context;
use fixture_app::logging::{self, LogDestination};
use fixture_app::{build_driver, render, FixtureConfig};
use fixture_logging::{fixture_error, fixture_info};
use log::LevelFilter;

fn main() -> anyhow::Result<ExitCode> {
    logging::initialize(
        LogDestination::Both,
        fixture_logging::level_from_env(LevelFilter::Info),
    );

    let config = FixtureConfig::load().context("loading fixture config")?;
    fixture_info!("Driving backend at {}", config.base_url);

    let driver = build_driver(&config).context("starting backend client")?;
    let report = driver.run();
    print!("{}", render::render_report(&report));

    if report.identity_resolved() {
        Ok(ExitCode::SUCCESS)
    } else {
        fixture_error!("Identity could not be resolved");
        Ok(ExitCode::FAILURE)
    }
}
