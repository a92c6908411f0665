// 💳 Account Entity - one client's identity and money
//
// Identity: full name + civic number (set at registration, never changes)
// Values: balance (changes through deposit/withdraw only)
//
// Money is a `Decimal` holding whole öre (at most two decimals), so what the
// balance line shows is exactly what can be withdrawn. The interest rate is
// stored as a fraction (5 % -> 0.05) and the one-year projection is
// balance * (1 + rate).

use crate::civic::CivicNumber;
use crate::error::{BankError, BankResult};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Decimals allowed on a money amount
const MONEY_SCALE: u32 = 2;

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// Client name as registered (capitalized)
    pub full_name: String,

    /// Canonical civic number (NNNNNN-NNNN)
    pub civic_number: CivicNumber,

    /// Never negative after a committed operation, never more than two decimals
    #[serde(with = "rust_decimal::serde::str")]
    balance: Decimal,

    /// Entered as a percent
    #[serde(with = "rust_decimal::serde::str")]
    interest_rate: Decimal,
}

impl Account {
    /// Build an account from already validated parts.
    ///
    /// Only the ledger calls this; it checks balance and interest first.
    pub(crate) fn new(
        full_name: String,
        civic_number: CivicNumber,
        balance: Decimal,
        interest_percent: Decimal,
    ) -> Self {
        Account {
            full_name,
            civic_number,
            balance,
            interest_rate: interest_percent / Decimal::ONE_HUNDRED,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Interest rate as the percentage the client entered
    pub fn interest_percent(&self) -> Decimal {
        self.interest_rate * Decimal::ONE_HUNDRED
    }

    /// Balance after one year at the current rate. Does not touch the account.
    ///
    /// `None` if the result does not fit in a `Decimal`.
    pub fn projected_balance(&self) -> Option<Decimal> {
        self.balance.checked_mul(Decimal::ONE + self.interest_rate)
    }

    /// Add `amount` to the balance and return the new balance
    pub fn deposit(&mut self, amount: Decimal) -> BankResult<Decimal> {
        ensure_money(amount)?;
        if amount < Decimal::ZERO {
            return Err(BankError::NegativeAmount);
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::AmountTooLarge)?;
        Ok(self.balance)
    }

    /// Take `amount` from the balance and return the new balance.
    ///
    /// The balance is left untouched on any error.
    pub fn withdraw(&mut self, amount: Decimal) -> BankResult<Decimal> {
        ensure_money(amount)?;
        if amount < Decimal::ZERO {
            return Err(BankError::NegativeAmount);
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::AmountTooLarge)?;
        Ok(self.balance)
    }

    /// Multi-line account summary shown for "Account info"
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// One-line balance message shown for "Check balance"
    pub fn balance_line(&self) -> String {
        format!("You have {:.2} SEK on your account", self.balance)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.full_name)?;
        writeln!(f, "Civic number: {}", self.civic_number)?;
        writeln!(f, "Balance: {:.2} SEK", self.balance)?;
        writeln!(f, "Interest rate: {:.2} %", self.interest_percent().round_dp(2))?;
        writeln!(f)?;
        match self.projected_balance() {
            Some(projected) => write!(
                f,
                "After one year you'll have: {:.2} SEK",
                projected.round_dp(MONEY_SCALE)
            ),
            None => write!(f, "After one year you'll have: more than we can count"),
        }
    }
}

// ============================================================================
// INPUT HELPERS
// ============================================================================

/// Parse a money amount or percentage typed by the client
pub fn parse_amount(input: &str) -> BankResult<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed).map_err(|_| BankError::NotANumber(trimmed.to_string()))
}

/// Money never carries more than two decimals ("1.50" and "1.500" are fine)
pub(crate) fn ensure_money(amount: Decimal) -> BankResult<()> {
    if amount.normalize().scale() > MONEY_SCALE {
        Err(BankError::TooPrecise(amount.to_string()))
    } else {
        Ok(())
    }
}

/// "aNNA maria" -> "Anna maria"
pub fn capitalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civic::normalize;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn create_test_account(balance: Decimal, interest_percent: Decimal) -> Account {
        Account::new(
            "Anna".to_string(),
            normalize("811228-9874").unwrap(),
            balance,
            interest_percent,
        )
    }

    #[test]
    fn test_interest_stored_as_fraction() {
        let account = create_test_account(dec!(1000), dec!(5));
        assert_eq!(account.interest_rate(), dec!(0.05));
        assert_eq!(account.interest_percent(), dec!(5));
    }

    #[test]
    fn test_deposit() {
        let mut account = create_test_account(dec!(100), dec!(0));
        assert_eq!(account.deposit(dec!(50.5)), Ok(dec!(150.5)));
        assert_eq!(account.balance(), dec!(150.5));
    }

    #[test]
    fn test_deposit_negative_rejected() {
        let mut account = create_test_account(dec!(100), dec!(0));
        assert_eq!(account.deposit(dec!(-1)), Err(BankError::NegativeAmount));
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn test_deposit_zero_allowed() {
        let mut account = create_test_account(dec!(100), dec!(0));
        assert_eq!(account.deposit(dec!(0)), Ok(dec!(100)));
        assert_eq!(account.withdraw(dec!(0)), Ok(dec!(100)));
    }

    #[test]
    fn test_deposit_then_withdraw_round_trip() {
        let mut account = create_test_account(dec!(0.1), dec!(2));
        account.deposit(dec!(0.2)).unwrap();
        account.withdraw(dec!(0.2)).unwrap();
        assert_eq!(account.balance(), dec!(0.1));
    }

    #[test]
    fn test_withdraw_exactly_the_displayed_balance() {
        let mut account = create_test_account(dec!(0.7), dec!(0));
        account.deposit(dec!(0.1)).unwrap();
        assert_eq!(account.balance_line(), "You have 0.80 SEK on your account");

        assert_eq!(account.withdraw(dec!(0.8)), Ok(dec!(0)));
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_balance() {
        let mut account = create_test_account(dec!(100), dec!(0));
        let err = account.withdraw(dec!(100.01)).unwrap_err();
        assert_eq!(
            err,
            BankError::InsufficientFunds {
                requested: dec!(100.01),
                available: dec!(100),
            }
        );
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn test_withdraw_negative_rejected() {
        let mut account = create_test_account(dec!(100), dec!(0));
        assert_eq!(account.withdraw(dec!(-5)), Err(BankError::NegativeAmount));
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn test_sub_cent_amounts_rejected() {
        let mut account = create_test_account(dec!(100), dec!(0));
        assert!(matches!(account.deposit(dec!(0.001)), Err(BankError::TooPrecise(_))));
        assert!(matches!(account.withdraw(dec!(0.005)), Err(BankError::TooPrecise(_))));
        assert_eq!(account.deposit(dec!(1.500)), Ok(dec!(101.5)));
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut account = create_test_account(Decimal::MAX, dec!(0));
        assert_eq!(account.deposit(dec!(1)), Err(BankError::AmountTooLarge));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_describe_projects_one_year() {
        let account = create_test_account(dec!(1000), dec!(5));
        let text = account.describe();

        assert!(text.contains("Name: Anna"));
        assert!(text.contains("Civic number: 811228-9874"));
        assert!(text.contains("Balance: 1000.00 SEK"));
        assert!(text.contains("Interest rate: 5.00 %"));
        assert!(text.ends_with("After one year you'll have: 1050.00 SEK"));
        assert_eq!(account.balance(), dec!(1000));
    }

    #[test]
    fn test_describe_projection_overflow() {
        let account = create_test_account(Decimal::MAX, dec!(50));
        assert_eq!(account.projected_balance(), None);
        assert!(account.describe().ends_with("more than we can count"));
    }

    #[test]
    fn test_balance_line() {
        let account = create_test_account(dec!(12.5), dec!(0));
        assert_eq!(account.balance_line(), "You have 12.50 SEK on your account");
    }

    #[rstest]
    #[case("42", dec!(42))]
    #[case(" 12.5 ", dec!(12.5))]
    #[case("-3", dec!(-3))]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("ten")]
    #[case("NaN")]
    #[case("inf")]
    #[case("1,5")]
    fn test_parse_amount_rejects(#[case] input: &str) {
        assert!(matches!(parse_amount(input), Err(BankError::NotANumber(_))));
    }

    #[rstest]
    #[case("anna", "Anna")]
    #[case("aNNA maria", "Anna maria")]
    #[case("  erik ", "Erik")]
    #[case("", "")]
    fn test_capitalize_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize_name(input), expected);
    }

    proptest! {
        #[test]
        fn prop_deposit_then_withdraw_leaves_balance(
            balance_ore in 0i64..10_000_000,
            amount_ore in 0i64..10_000_000,
        ) {
            let balance = Decimal::new(balance_ore, 2);
            let amount = Decimal::new(amount_ore, 2);
            let mut account = create_test_account(balance, dec!(3));

            account.deposit(amount).unwrap();
            account.withdraw(amount).unwrap();
            prop_assert_eq!(account.balance(), balance);
        }

        #[test]
        fn prop_displayed_balance_can_be_withdrawn(
            start_ore in 0i64..10_000_000,
            deposits in proptest::collection::vec(0i64..100_000, 0..8),
        ) {
            let mut account = create_test_account(Decimal::new(start_ore, 2), dec!(0));
            for ore in deposits {
                account.deposit(Decimal::new(ore, 2)).unwrap();
            }

            let shown = format!("{:.2}", account.balance());
            let typed = parse_amount(&shown).unwrap();
            prop_assert_eq!(account.withdraw(typed), Ok(Decimal::ZERO));
        }
    }
}
