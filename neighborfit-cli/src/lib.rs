//! Command-line interface for the NeighborFit engine.
//!
//! Every command loads a JSON dataset into the in-memory collaborators,
//! runs one engine operation and prints the result as pretty JSON.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod commands;
mod dataset;
mod error;

pub use error::CliError;

use commands::{
    AnonymousArgs, CitiesArgs, CompareArgs, MatchArgs, RecommendArgs, SearchArgs, ShowArgs,
    StatsArgs,
};

const ARG_DATASET: &str = "dataset";
const ARG_USER: &str = "user";
const ARG_AREA_ID: &str = "id";

/// Run the NeighborFit CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration or the dataset are
/// invalid, when the engine rejects the request, or when output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli, &mut stdout)
}

fn run_with(cli: Cli, writer: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Command::Match(args) => commands::run_match(args, writer),
        Command::Anonymous(args) => commands::run_anonymous(args, writer),
        Command::Search(args) => commands::run_search(args, writer),
        Command::Compare(args) => commands::run_compare(args, writer),
        Command::Recommend(args) => commands::run_recommend(args, writer),
        Command::Stats(args) => commands::run_stats(args, writer),
        Command::Cities(args) => commands::run_cities(args, writer),
        Command::Show(args) => commands::run_show(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "neighborfit",
    about = "Score, rank, compare and recommend residential areas",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank areas against a user's stored preferences.
    Match(MatchArgs),
    /// List safe areas matching ad-hoc criteria, without a profile.
    Anonymous(AnonymousArgs),
    /// Search areas by attribute and sort the results.
    Search(SearchArgs),
    /// Compare two or more areas side by side.
    Compare(CompareArgs),
    /// Recommend areas similar to a user's favourites.
    Recommend(RecommendArgs),
    /// Report population-wide statistics.
    Stats(StatsArgs),
    /// List the distinct cities in the dataset.
    Cities(CitiesArgs),
    /// Show a single area.
    Show(ShowArgs),
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
