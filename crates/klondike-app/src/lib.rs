pub mod cli;
pub mod driver;
pub mod logging;
pub mod render;

pub use cli::{CliError, CliOutcome};
pub use driver::{BatchSummary, DriverConfig, GameOutcome, GameReport};
