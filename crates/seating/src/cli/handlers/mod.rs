//! Subcommand handlers

mod generate;
mod lookup;
mod preview;

use anyhow::Result;
use clap::ArgMatches;

pub use generate::GenerateSummary;

pub fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("generate", sub_m)) => generate::handle(sub_m),
        Some(("preview", sub_m)) => preview::handle(sub_m),
        Some(("lookup", sub_m)) => lookup::handle(sub_m),
        _ => anyhow::bail!("Unknown command. Run 'seating --help' for usage."),
    }
}
