// ⚙️ Configuration - command line flags, each with an environment fallback

use crate::entities::LedgerPolicy;
use clap::Parser;

pub const DEFAULT_BANK_NAME: &str = "HKR Bank";

#[derive(Debug, Clone, Parser)]
#[command(name = "console-bank", version, about = "Terminal retail bank simulation")]
pub struct BankConfig {
    /// Name shown in the welcome and farewell lines
    #[arg(long, env = "BANK_NAME", default_value = DEFAULT_BANK_NAME)]
    pub bank_name: String,

    /// No colours, no screen clearing
    #[arg(long, env = "BANK_PLAIN")]
    pub plain: bool,

    /// Refuse to register a civic number that is already on file
    #[arg(long, env = "BANK_UNIQUE_CIVIC_NUMBERS")]
    pub unique_civic_numbers: bool,

    /// tracing filter used when RUST_LOG is not set (logs go to stderr)
    #[arg(long, env = "BANK_LOG", default_value = "warn")]
    pub log_filter: String,
}

impl BankConfig {
    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            unique_civic_numbers: self.unique_civic_numbers,
        }
    }

    pub fn styled(&self) -> bool {
        !self.plain
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            bank_name: DEFAULT_BANK_NAME.to_string(),
            plain: false,
            unique_civic_numbers: false,
            log_filter: "warn".to_string(),
        }
    }
}
