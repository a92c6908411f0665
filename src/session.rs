// 🔐 Session Controller - guest / authenticated state machine
//
// GUEST          --CreateClient-->  GUEST (ledger may grow)
// GUEST          --Login (ok)---->  AUTHENTICATED
// GUEST          --Exit---------->  TERMINATED
// AUTHENTICATED  --Deposit/Withdraw/CheckBalance/AccountInfo--> AUTHENTICATED
// AUTHENTICATED  --LogOut-------->  GUEST
//
// Every domain error is reported on the console and leaves the state as it was.
// Only console I/O failures propagate out of the loop.

use crate::command::{parse_selection, AuthCommand, GuestCommand, MenuCommand};
use crate::console::{Console, Presenter};
use crate::entities::{capitalize_name, parse_amount, Account, AccountRef, Ledger};
use crate::error::BankError;
use rust_decimal::Decimal;
use std::io;
use tracing::{debug, info};

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Guest,
    Authenticated,
    Terminated,
}

/// Who is logged in and whether the loop keeps going
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Points into the ledger; the ledger owns the account
    current_account: Option<AccountRef>,
    running: bool,
}

impl Session {
    pub fn new() -> Self {
        Session {
            current_account: None,
            running: true,
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.running, self.current_account) {
            (false, _) => SessionState::Terminated,
            (true, Some(_)) => SessionState::Authenticated,
            (true, None) => SessionState::Guest,
        }
    }

    pub fn current_account(&self) -> Option<AccountRef> {
        self.current_account
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn log_in(&mut self, account: AccountRef) {
        self.current_account = Some(account);
    }

    fn log_out(&mut self) {
        self.current_account = None;
    }

    fn terminate(&mut self) {
        self.running = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct SessionController<C: Console> {
    bank_name: String,
    ledger: Ledger,
    session: Session,
    console: C,
}

impl<C: Console> SessionController<C> {
    pub fn new(bank_name: impl Into<String>, ledger: Ledger, console: C) -> Self {
        SessionController {
            bank_name: bank_name.into(),
            ledger,
            session: Session::new(),
            console,
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Blocking read-eval loop until the client exits or input closes
    pub fn run(&mut self) -> io::Result<()> {
        self.console.clear_screen()?;
        self.console.success(&format!("Welcome to {}!", self.bank_name))?;
        self.console.plain("")?;
        info!(bank = %self.bank_name, "session started");

        while self.session.is_running() {
            self.step()?;
            self.console.plain("")?;
        }

        self.console.success(&format!("Thank you for using {}!", self.bank_name))?;
        info!(accounts = self.ledger.len(), "session finished");
        match self.ledger.snapshot_json() {
            Ok(snapshot) => debug!(%snapshot, "ledger at exit"),
            Err(err) => debug!(error = %err, "ledger snapshot failed"),
        }

        Ok(())
    }

    /// One loop iteration: show the menu for the current state and handle the choice
    pub fn step(&mut self) -> io::Result<()> {
        match self.session.state() {
            SessionState::Guest => {
                if let Some(command) = self.read_command::<GuestCommand>()? {
                    self.dispatch_guest(command)?;
                }
            }
            SessionState::Authenticated => {
                if let Some(command) = self.read_command::<AuthCommand>()? {
                    self.dispatch_auth(command)?;
                }
            }
            SessionState::Terminated => {}
        }
        Ok(())
    }

    pub fn dispatch_guest(&mut self, command: GuestCommand) -> io::Result<()> {
        debug!(?command, "guest command");
        match command {
            GuestCommand::CreateClient => self.create_client(),
            GuestCommand::Login => self.login(),
            GuestCommand::Exit => {
                self.session.terminate();
                Ok(())
            }
        }
    }

    pub fn dispatch_auth(&mut self, command: AuthCommand) -> io::Result<()> {
        debug!(?command, "authenticated command");
        match command {
            AuthCommand::Deposit => self.deposit(),
            AuthCommand::Withdraw => self.withdraw(),
            AuthCommand::CheckBalance => {
                let Some(line) = self.current().map(|a| a.balance_line()) else {
                    return self.lost_account();
                };
                self.console.plain(&line)
            }
            AuthCommand::AccountInfo => {
                let Some(text) = self.current().map(|a| a.describe()) else {
                    return self.lost_account();
                };
                self.console.plain(&text)
            }
            AuthCommand::LogOut => {
                if let Some(account) = self.session.current_account() {
                    info!(position = account.position(), "client logged out");
                }
                self.session.log_out();
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Guest flows
    // ------------------------------------------------------------------------

    fn create_client(&mut self) -> io::Result<()> {
        self.console.info("Registering new client")?;

        let Some(name) = self.read("Please enter your name: ")? else {
            return Ok(());
        };
        let Some(civic_number) = self.read("Please enter your civic number: ")? else {
            return Ok(());
        };
        // a non-numeric balance stops here, before the interest prompt
        let Some(balance) = self.read_amount("Please enter how much money you have: ")? else {
            return Ok(());
        };
        let Some(interest) = self.read_amount("Please enter the interest rate in percent: ")? else {
            return Ok(());
        };

        let outcome = self
            .ledger
            .create_account(&capitalize_name(&name), civic_number.trim(), balance, interest)
            .map(|account| {
                format!(
                    "Client {} registered with civic number {}",
                    account.full_name, account.civic_number
                )
            });

        match outcome {
            Ok(message) => self.console.success(&message),
            Err(err) => self.report(&err),
        }
    }

    fn login(&mut self) -> io::Result<()> {
        self.console.info("Login")?;
        if self.ledger.is_empty() {
            return self.report(&BankError::EmptyLedger);
        }

        self.console.plain("Select an account:")?;
        for (index, name) in self.ledger.list_accounts() {
            self.console.plain(&format!("{}. {}", index, name))?;
        }

        let Some(line) = self.read("")? else {
            return Ok(());
        };
        let index = match parse_selection(&line) {
            Ok(index) => index,
            Err(err) => return self.report(&err),
        };
        self.console.clear_screen()?;

        let account = match self.ledger.resolve_selection(index) {
            Ok(account) => account,
            Err(err) => return self.report(&err),
        };

        self.session.log_in(account);
        info!(position = account.position(), "client logged in");

        let Some(name) = self.current().map(|a| a.full_name.clone()) else {
            return self.lost_account();
        };
        self.console.success(&format!("Logged in as {}", name))
    }

    // ------------------------------------------------------------------------
    // Authenticated flows
    // ------------------------------------------------------------------------

    fn deposit(&mut self) -> io::Result<()> {
        self.console.info("Deposit")?;
        let Some(amount) = self.read_amount("How much money do you want to deposit (SEK)? ")? else {
            return Ok(());
        };

        let Some(account) = self.current_mut() else {
            return self.lost_account();
        };
        match account.deposit(amount) {
            Ok(balance) => self.console.success(&format!(
                "Deposited {:.2} SEK, new balance {:.2} SEK",
                amount, balance
            )),
            Err(err) => self.report(&err),
        }
    }

    fn withdraw(&mut self) -> io::Result<()> {
        self.console.info("Withdraw")?;
        let Some(amount) = self.read_amount("How much you want to withdraw (SEK)? ")? else {
            return Ok(());
        };

        let Some(account) = self.current_mut() else {
            return self.lost_account();
        };
        match account.withdraw(amount) {
            Ok(balance) => self.console.success(&format!(
                "Withdrew {:.2} SEK, new balance {:.2} SEK",
                amount, balance
            )),
            Err(err) => self.report(&err),
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn current(&self) -> Option<&Account> {
        self.session
            .current_account()
            .and_then(|account| self.ledger.get(account))
    }

    fn current_mut(&mut self) -> Option<&mut Account> {
        let account = self.session.current_account()?;
        self.ledger.get_mut(account)
    }

    /// The session points at an account the ledger does not have; drop back to guest
    fn lost_account(&mut self) -> io::Result<()> {
        debug!("current account missing from ledger, logging out");
        self.session.log_out();
        Ok(())
    }

    /// Read one line; a closed input ends the session
    fn read(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let line = self.console.read_line(prompt)?;
        if line.is_none() {
            info!("input closed, ending session");
            self.session.terminate();
        }
        Ok(line)
    }

    /// Read and parse a number. `None` once the problem has been reported or input closed.
    fn read_amount(&mut self, prompt: &str) -> io::Result<Option<Decimal>> {
        let Some(line) = self.read(prompt)? else {
            return Ok(None);
        };
        match parse_amount(&line) {
            Ok(amount) => Ok(Some(amount)),
            Err(err) => {
                self.report(&err)?;
                Ok(None)
            }
        }
    }

    /// Show the menu for `T` and parse the choice. Clears the screen once a number was typed.
    fn read_command<T: MenuCommand>(&mut self) -> io::Result<Option<T>> {
        let Some(line) = self.read(&T::menu())? else {
            return Ok(None);
        };
        let code = match parse_selection(&line) {
            Ok(code) => code,
            Err(err) => {
                self.report(&err)?;
                return Ok(None);
            }
        };
        self.console.clear_screen()?;

        match T::from_code(code) {
            Ok(command) => Ok(Some(command)),
            Err(err) => {
                self.report(&err)?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &BankError) -> io::Result<()> {
        debug!(kind = err.kind(), state = ?self.session.state(), "operation rejected");
        self.console.error(&err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
