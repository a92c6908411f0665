// 🧭 Menu Commands - what the client can pick in each session state
//
// Each state has its own closed set of commands, selected by number.

use crate::error::{BankError, BankResult};

/// A numbered menu entry
pub trait MenuCommand: Copy + Sized + 'static {
    /// Every command, in menu order
    const ALL: &'static [Self];

    /// Number the client types
    fn code(&self) -> i64;

    /// Text shown next to the number
    fn label(&self) -> &'static str;

    fn from_code(code: i64) -> BankResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|command| command.code() == code)
            .ok_or(BankError::InvalidCommand(code))
    }

    /// "Select operation:" followed by one numbered line per command
    fn menu() -> String {
        let mut text = String::from("Select operation:\n");
        for command in Self::ALL {
            text.push_str(&format!("{}. {}\n", command.code(), command.label()));
        }
        text
    }
}

// ============================================================================
// GUEST COMMANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCommand {
    CreateClient,
    Login,
    Exit,
}

impl MenuCommand for GuestCommand {
    const ALL: &'static [Self] = &[
        GuestCommand::CreateClient,
        GuestCommand::Login,
        GuestCommand::Exit,
    ];

    fn code(&self) -> i64 {
        match self {
            GuestCommand::CreateClient => 1,
            GuestCommand::Login => 2,
            GuestCommand::Exit => 3,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GuestCommand::CreateClient => "Create a client",
            GuestCommand::Login => "Login to online-bank",
            GuestCommand::Exit => "Exit",
        }
    }
}

// ============================================================================
// AUTHENTICATED COMMANDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCommand {
    Deposit,
    Withdraw,
    CheckBalance,
    AccountInfo,
    LogOut,
}

impl MenuCommand for AuthCommand {
    const ALL: &'static [Self] = &[
        AuthCommand::Deposit,
        AuthCommand::Withdraw,
        AuthCommand::CheckBalance,
        AuthCommand::AccountInfo,
        AuthCommand::LogOut,
    ];

    fn code(&self) -> i64 {
        match self {
            AuthCommand::Deposit => 1,
            AuthCommand::Withdraw => 2,
            AuthCommand::CheckBalance => 3,
            AuthCommand::AccountInfo => 4,
            AuthCommand::LogOut => 5,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AuthCommand::Deposit => "Deposit",
            AuthCommand::Withdraw => "Withdraw",
            AuthCommand::CheckBalance => "Check balance",
            AuthCommand::AccountInfo => "Account info",
            AuthCommand::LogOut => "Log out",
        }
    }
}

/// Parse a menu choice or login selection
pub fn parse_selection(input: &str) -> BankResult<i64> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| BankError::NotANumber(trimmed.to_string()))
}
