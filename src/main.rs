use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use console_bank::{BankConfig, Ledger, SessionController, TerminalConsole};

fn main() -> Result<()> {
    let config = BankConfig::parse();
    init_logging(&config)?;

    let ledger = Ledger::with_policy(config.ledger_policy());
    let console = TerminalConsole::stdio(config.styled());

    let mut controller = SessionController::new(config.bank_name.clone(), ledger, console);
    controller.run().context("console I/O failed")?;

    Ok(())
}

/// Logs go to stderr so they never mix with the menus on stdout
fn init_logging(config: &BankConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .with_context(|| format!("invalid log filter `{}`", config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install logger")
}
