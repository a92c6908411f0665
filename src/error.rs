// ⚠️ Bank Errors - every failure the console can report
// All of these are recoverable: the session prints the message and stays in the same state.

use rust_decimal::Decimal;
use thiserror::Error;

/// Domain errors. The `Display` text is what the client sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Civic number does not match any accepted shape, or holds a non-digit
    #[error("Wrong civic number: `{0}` is not YYMMDD-NNNN, YYYYMMDD-NNNN, YYYYMMDDNNNN or YYMMDDNNNN")]
    InvalidFormat(String),

    /// Civic number is well formed but its check digit is wrong
    #[error("Wrong civic number: check digit {found} does not match")]
    InvalidChecksum { expected: u32, found: u32 },

    #[error("Amount can't be negative")]
    NegativeAmount,

    #[error("Not enough money: {available:.2} SEK available, {requested:.2} SEK requested")]
    InsufficientFunds { requested: Decimal, available: Decimal },

    /// Input that should have been a number
    #[error("Invalid input, please enter a number.")]
    NotANumber(String),

    /// Login selection outside 1..=count
    #[error("Account doesn't exist")]
    OutOfRange { index: i64, count: usize },

    #[error("Invalid operation, try again")]
    InvalidCommand(i64),

    /// Money amount with fractions of an öre
    #[error("Amounts can have at most two decimals, got {0}")]
    TooPrecise(String),

    #[error("Amount too large")]
    AmountTooLarge,

    #[error("Balance can't be negative")]
    NegativeBalance,

    #[error("Interest rate can't be negative")]
    NegativeInterest,

    #[error("You need to create an account first")]
    EmptyLedger,

    /// Only raised when the ledger enforces unique civic numbers
    #[error("A client with civic number {0} already exists")]
    DuplicateCivicNumber(String),
}

impl BankError {
    /// Short stable name for log records
    pub fn kind(&self) -> &'static str {
        match self {
            BankError::InvalidFormat(_) => "InvalidFormat",
            BankError::InvalidChecksum { .. } => "InvalidChecksum",
            BankError::NegativeAmount => "NegativeAmount",
            BankError::InsufficientFunds { .. } => "InsufficientFunds",
            BankError::NotANumber(_) => "NotANumber",
            BankError::OutOfRange { .. } => "OutOfRange",
            BankError::InvalidCommand(_) => "InvalidCommand",
            BankError::TooPrecise(_) => "TooPrecise",
            BankError::AmountTooLarge => "AmountTooLarge",
            BankError::NegativeBalance => "NegativeBalance",
            BankError::NegativeInterest => "NegativeInterest",
            BankError::EmptyLedger => "EmptyLedger",
            BankError::DuplicateCivicNumber(_) => "DuplicateCivicNumber",
        }
    }
}

pub type BankResult<T> = Result<T, BankError>;
