//! Entry point for the `neighborfit` command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    pretty_env_logger::init();
    neighborfit_cli::run()?;
    Ok(())
}
