// Console Bank - Core Library
// Exposes the domain, the session state machine and the console shim for the binary and tests

pub mod error;
pub mod civic;          // Civic number checksum validation
pub mod entities;       // Account + Ledger
pub mod command;        // Menu commands per session state
pub mod console;        // Line I/O + Presenter
pub mod session;        // Guest / authenticated state machine
pub mod config;         // CLI / environment configuration

// Re-export commonly used types
pub use error::{BankError, BankResult};
pub use civic::{check_digit, normalize, CivicNumber};
pub use entities::{
    Account, AccountRef, Ledger, LedgerPolicy,
    capitalize_name, parse_amount,
};
pub use command::{AuthCommand, GuestCommand, MenuCommand, parse_selection};
pub use console::{Console, Presenter, TerminalConsole, Tone};
pub use session::{Session, SessionController, SessionState};
pub use config::BankConfig;

// Money type taken by `Ledger::create_account`, `Account::deposit` and `Account::withdraw`
pub use rust_decimal::Decimal;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
