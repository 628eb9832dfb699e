extern crate reqwest;
extern crate serde;

pub mod aimharder;
pub mod config;
pub mod dates;
pub mod driver;
pub mod error;
mod logging;

pub use aimharder::{ClassBooker, Client};
pub use config::Config;
pub use driver::{Driver, RunError, SlotPolicy};
pub use error::{Error, Result};
