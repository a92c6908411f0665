// 📒 Ledger - registry of all client accounts
//
// Accounts are kept in registration order and never removed, so the 1-based
// position shown in the login list is a stable selection key.

use crate::civic::{self, CivicNumber};
use crate::entities::account::{ensure_money, Account};
use crate::error::{BankError, BankResult};
use rust_decimal::Decimal;
use tracing::info;

// ============================================================================
// ACCOUNT REFERENCE
// ============================================================================

/// Position of an account inside the ledger.
///
/// The session holds one of these instead of the account itself; the ledger
/// stays the only owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef(usize);

impl AccountRef {
    /// 1-based number shown to the client
    pub fn position(&self) -> usize {
        self.0 + 1
    }
}

// ============================================================================
// POLICY
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Reject a registration whose civic number is already on file
    pub unique_civic_numbers: bool,
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Default)]
pub struct Ledger {
    /// Append-only, insertion order is the index
    accounts: Vec<Account>,
    policy: LedgerPolicy,
}

impl Ledger {
    /// Create new empty ledger with the permissive default policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LedgerPolicy) -> Self {
        Ledger {
            accounts: Vec::new(),
            policy,
        }
    }

    /// Validate and register a new client.
    ///
    /// Checks run in order: civic number, balance, interest. Nothing is
    /// appended unless all of them pass.
    pub fn create_account(
        &mut self,
        name: &str,
        raw_civic_number: &str,
        balance: Decimal,
        interest_percent: Decimal,
    ) -> BankResult<&Account> {
        let civic_number = civic::normalize(raw_civic_number)?;

        if balance < Decimal::ZERO {
            return Err(BankError::NegativeBalance);
        }
        ensure_money(balance)?;
        if interest_percent < Decimal::ZERO {
            return Err(BankError::NegativeInterest);
        }

        if self.policy.unique_civic_numbers && self.find_by_civic_number(&civic_number).is_some() {
            return Err(BankError::DuplicateCivicNumber(civic_number.to_string()));
        }

        self.accounts.push(Account::new(
            name.to_string(),
            civic_number,
            balance,
            interest_percent,
        ));

        let position = self.accounts.len();
        info!(position, "account registered");

        Ok(&self.accounts[position - 1])
    }

    /// `(1-based index, name)` pairs for the login list
    pub fn list_accounts(&self) -> Vec<(usize, &str)> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(i, account)| (i + 1, account.full_name.as_str()))
            .collect()
    }

    /// Turn a 1-based selection into a reference
    pub fn resolve_selection(&self, index: i64) -> BankResult<AccountRef> {
        let count = self.accounts.len();
        match usize::try_from(index) {
            Ok(position) if (1..=count).contains(&position) => Ok(AccountRef(position - 1)),
            _ => Err(BankError::OutOfRange { index, count }),
        }
    }

    pub fn get(&self, account: AccountRef) -> Option<&Account> {
        self.accounts.get(account.0)
    }

    pub fn get_mut(&mut self, account: AccountRef) -> Option<&mut Account> {
        self.accounts.get_mut(account.0)
    }

    pub fn find_by_civic_number(&self, civic_number: &CivicNumber) -> Option<AccountRef> {
        self.accounts
            .iter()
            .position(|account| &account.civic_number == civic_number)
            .map(AccountRef)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// JSON dump of every account, for debug logging
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.accounts)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn ledger_with_two() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_account("Anna", "811228-9874", dec!(1000), dec!(5)).unwrap();
        ledger.create_account("Erik", "6408233234", dec!(50), dec!(0)).unwrap();
        ledger
    }

    #[test]
    fn test_create_account() {
        let mut ledger = Ledger::new();
        let account = ledger
            .create_account("Anna", "19811228-9874", dec!(1000), dec!(5))
            .unwrap();

        assert_eq!(account.full_name, "Anna");
        assert_eq!(account.civic_number.as_str(), "811228-9874");
        assert_eq!(account.balance(), dec!(1000));
        assert_eq!(account.interest_rate(), dec!(0.05));
        assert_eq!(ledger.len(), 1);
    }

    #[rstest]
    #[case("811228", dec!(10), dec!(1))]
    #[case("811228-9875", dec!(10), dec!(1))]
    #[case("811228-9874", dec!(-10), dec!(1))]
    #[case("811228-9874", dec!(10), dec!(-1))]
    #[case("811228-9874", dec!(10.005), dec!(1))]
    fn test_failed_creation_never_appends(
        #[case] civic: &str,
        #[case] balance: Decimal,
        #[case] interest: Decimal,
    ) {
        let mut ledger = ledger_with_two();
        assert!(ledger.create_account("Nils", civic, balance, interest).is_err());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_civic_number_checked_before_balance() {
        let mut ledger = Ledger::new();
        let err = ledger.create_account("Nils", "bogus", dec!(-1), dec!(-1)).unwrap_err();
        assert!(matches!(err, BankError::InvalidFormat(_)));
    }

    #[test]
    fn test_balance_checked_before_interest() {
        let mut ledger = Ledger::new();
        let err = ledger.create_account("Nils", "811228-9874", dec!(-1), dec!(-1)).unwrap_err();
        assert_eq!(err, BankError::NegativeBalance);
    }

    #[test]
    fn test_sub_cent_balance_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger.create_account("Nils", "811228-9874", dec!(0.001), dec!(1)).unwrap_err();
        assert!(matches!(err, BankError::TooPrecise(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_fractional_interest_allowed() {
        let mut ledger = Ledger::new();
        let account = ledger.create_account("Nils", "811228-9874", dec!(100), dec!(2.125)).unwrap();
        assert_eq!(account.interest_rate(), dec!(0.02125));
    }

    #[test]
    fn test_zero_balance_and_interest_allowed() {
        let mut ledger = Ledger::new();
        assert!(ledger.create_account("Nils", "811228-9874", dec!(0), dec!(0)).is_ok());
    }

    #[test]
    fn test_duplicates_allowed_by_default() {
        let mut ledger = Ledger::new();
        ledger.create_account("Anna", "811228-9874", dec!(1), dec!(1)).unwrap();
        ledger.create_account("Anna", "198112289874", dec!(1), dec!(1)).unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_duplicates_rejected_with_unique_policy() {
        let mut ledger = Ledger::with_policy(LedgerPolicy {
            unique_civic_numbers: true,
        });
        ledger.create_account("Anna", "811228-9874", dec!(1), dec!(1)).unwrap();

        let err = ledger.create_account("Anna", "198112289874", dec!(1), dec!(1)).unwrap_err();
        assert_eq!(err, BankError::DuplicateCivicNumber("811228-9874".to_string()));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_list_accounts_in_registration_order() {
        let ledger = ledger_with_two();
        assert_eq!(ledger.list_accounts(), vec![(1, "Anna"), (2, "Erik")]);
    }

    #[test]
    fn test_resolve_selection() {
        let ledger = ledger_with_two();

        let second = ledger.resolve_selection(2).unwrap();
        assert_eq!(second.position(), 2);
        assert_eq!(ledger.get(second).unwrap().full_name, "Erik");
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(-1)]
    #[case(i64::MAX)]
    fn test_resolve_selection_out_of_range(#[case] index: i64) {
        let ledger = ledger_with_two();
        assert_eq!(
            ledger.resolve_selection(index),
            Err(BankError::OutOfRange { index, count: 2 })
        );
    }

    #[test]
    fn test_get_mut_updates_owned_account() {
        let mut ledger = ledger_with_two();
        let first = ledger.resolve_selection(1).unwrap();

        ledger.get_mut(first).unwrap().deposit(dec!(500)).unwrap();
        assert_eq!(ledger.get(first).unwrap().balance(), dec!(1500));
    }

    #[test]
    fn test_snapshot_json() {
        let ledger = ledger_with_two();
        let json = ledger.snapshot_json().unwrap();

        assert!(json.contains("\"full_name\":\"Anna\""));
        assert!(json.contains("\"civic_number\":\"811228-9874\""));
        assert!(json.contains("\"interest_rate\":\"0.05\""));
    }
}
