//! Shared test harness modules for the NeighborFit CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod command_runs;
mod dataset_unit;
mod helpers;
mod unit;
