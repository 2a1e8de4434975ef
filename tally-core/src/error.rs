use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::account_types::AccountType;

/// Errors raised while constructing or validating ledger entities.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum LedgerError {
    #[error("invalid account name: {0}")]
    InvalidAccountName(String),

    #[error("root name {name} is already used by {holder:?} accounts")]
    RootNameTaken { name: String, holder: AccountType },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("cost amount must not be negative: {0}")]
    NegativeCost(String),

    #[error("commodity {0} is already declared")]
    DuplicateCommodity(String),

    #[error("account {0} is already declared")]
    DuplicateAccount(String),

    #[error("price for {commodity} in {currency} on {date} is already declared")]
    DuplicatePrice {
        date: NaiveDate,
        commodity: String,
        currency: String,
    },

    #[error("account {0} does not exist")]
    UnknownAccount(String),

    #[error("account {account} is not open on {date}")]
    AccountNotOpen { account: String, date: NaiveDate },

    #[error("account {account} only accepts {expected}, got {found}")]
    CommodityMismatch {
        account: String,
        expected: String,
        found: String,
    },

    #[error("transaction on {0} has no postings")]
    NoPostings(NaiveDate),

    #[error("transaction on {date} does not balance: {residual} {commodity} too much")]
    Unbalanced {
        date: NaiveDate,
        commodity: String,
        residual: Decimal,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;
