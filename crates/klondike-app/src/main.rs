#![deny(warnings)]

use anyhow::Context as _;
use klondike_app::cli::{self, CliOutcome};
use klondike_app::logging;

fn main() -> anyhow::Result<()> {
    logging::init();
    match cli::run_cli() {
        Ok(CliOutcome::Handled) => Ok(()),
        Ok(CliOutcome::NotHandled) => cli::run_default()
            .map_err(|err| anyhow::anyhow!("{err}"))
            .context("playing a default game"),
        Err(err) => Err(anyhow::anyhow!("{err}")),
    }
}
