//! Data representation for tally, a text-based double-entry bookkeeping ledger.
//!
//! The [`Ledger`] is filled by `tally-parser` and read by reporting and import tools.

pub use account::{Account, AccountName, BookingMethod};
pub use account_types::{AccountType, RootNames};
pub use amount::Amount;
pub use commodity::Commodity;
pub use cost::Cost;
pub use directives::*;
pub use error::{LedgerError, LedgerResult};
pub use flags::Flag;
pub use ledger::Ledger;
pub use metadata::{MetaData, Tag};
pub use posting::{Posting, TransactionId, TransactionPosting, Weight};
pub use transaction::{tolerance, Transaction, TransactionMetaData};

pub mod account;
pub mod account_types;
pub mod amount;
pub mod commodity;
pub mod cost;
pub mod directives;
pub mod error;
pub mod flags;
pub mod ledger;
pub mod metadata;
pub mod posting;
pub mod transaction;
