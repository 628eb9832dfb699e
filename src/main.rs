extern crate aimharder_lib;

use std::process::ExitCode;

use aimharder_lib::dates::{self, SystemClock};
use aimharder_lib::{Client, Config, Driver};
use log::{error, LevelFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match Client::new(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let dates = dates::next_week_dates(&SystemClock);
    let driver = Driver::new(client, config.slot_policy(), config.pause());

    match driver.run(&dates).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to book some classes:\n{}", e);
            ExitCode::FAILURE
        }
    }
}
