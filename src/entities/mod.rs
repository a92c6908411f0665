// Entity Models
//
// - Account: one client's identity and balance
// - Ledger: owns every Account, in registration order

pub mod account;
pub mod ledger;

pub use account::{capitalize_name, parse_amount, Account};
pub use ledger::{AccountRef, Ledger, LedgerPolicy};
