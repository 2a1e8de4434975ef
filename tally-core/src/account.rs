use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use typed_builder::TypedBuilder;

use super::account_types::{AccountType, RootNames};
use super::error::{LedgerError, LedgerResult};
use super::metadata::MetaData;
use super::posting::Posting;

/// The full, colon-separated name of an account.
///
/// The first segment must be one of the five root names and at least one
/// further segment must follow:
///
/// ```text
/// Assets:US:BofA:Checking
/// Liabilities:CA:RBC:CreditCard
/// Equity:Retained-Earnings
/// Income:US:Acme:Salary
/// Expenses:Food:Groceries
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct AccountName {
    ty: AccountType,
    full_name: String,
}

impl AccountName {
    /// Validates `name` against the given root names.
    pub fn parse(name: &str, roots: &RootNames) -> LedgerResult<AccountName> {
        let mut segments = name.split(':');
        let root = segments.next().unwrap_or_default();
        let ty = roots
            .account_type(root)
            .ok_or_else(|| LedgerError::InvalidAccountName(name.to_string()))?;
        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() || rest.iter().any(|s| s.is_empty() || s.contains(char::is_whitespace)) {
            return Err(LedgerError::InvalidAccountName(name.to_string()));
        }
        Ok(AccountName {
            ty,
            full_name: name.to_string(),
        })
    }

    pub fn account_type(&self) -> AccountType {
        self.ty
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Segments following the root, e.g. `["US", "BofA"]` for `Assets:US:BofA`.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.full_name.split(':').skip(1)
    }
}

impl FromStr for AccountName {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountName::parse(s, &RootNames::default())
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Inventory booking method of an account. Only `Strict` has behavior attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BookingMethod {
    Strict,
    Lifo,
    Fifo,
}

impl BookingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingMethod::Strict => "STRICT",
            BookingMethod::Lifo => "LIFO",
            BookingMethod::Fifo => "FIFO",
        }
    }
}

impl FromStr for BookingMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STRICT" => Ok(BookingMethod::Strict),
            "LIFO" => Ok(BookingMethod::Lifo),
            "FIFO" => Ok(BookingMethod::Fifo),
            _ => Err(()),
        }
    }
}

/// An account as declared by `open` and, later, `close` directives.
///
/// ```text
/// 2014-05-01 open Liabilities:CreditCard:CapitalOne USD "STRICT"
/// 2016-11-28 close Liabilities:CreditCard:CapitalOne
/// ```
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Account {
    pub name: AccountName,

    #[builder(default)]
    pub opening: Option<NaiveDate>,

    #[builder(default)]
    pub closing: Option<NaiveDate>,

    /// Restricts postings to this single commodity.
    #[builder(default)]
    pub commodity: Option<String>,

    #[builder(default)]
    pub booking_method: Option<BookingMethod>,

    #[builder(default)]
    pub meta: MetaData,
}

impl Account {
    /// Date used to order accounts: the opening, or the closing of a
    /// close-only record.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.opening.or(self.closing)
    }

    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        match self.opening {
            Some(opening) => opening <= date && self.closing.map_or(true, |c| date <= c),
            None => false,
        }
    }

    /// Checks that the account accepts `posting` in a transaction dated `date`.
    pub fn validate_posting(&self, posting: &Posting, date: NaiveDate) -> LedgerResult<()> {
        if !self.is_open_on(date) {
            return Err(LedgerError::AccountNotOpen {
                account: self.name.to_string(),
                date,
            });
        }
        match &self.commodity {
            Some(expected) if *expected != posting.amount.commodity => {
                Err(LedgerError::CommodityMismatch {
                    account: self.name.to_string(),
                    expected: expected.clone(),
                    found: posting.amount.commodity.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn is_posting_valid(&self, posting: &Posting, date: NaiveDate) -> bool {
        self.validate_posting(posting, date).is_ok()
    }
}
