use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use super::error::{LedgerError, LedgerResult};
use super::flags::Flag;
use super::ledger::Ledger;
use super::metadata::{MetaData, Tag};
use super::posting::Posting;

/// Header of a transaction: everything on its first line plus the metadata lines
/// directly below it.
///
/// ```text
/// 2014-05-05 * "Cafe Mogador" "Lamb tagine with wine" #dinner
///   receipt: "2014-05-05.pdf"
/// ```
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct TransactionMetaData {
    pub date: NaiveDate,

    #[builder(default)]
    pub payee: String,

    #[builder(default)]
    pub narration: String,

    #[builder(default)]
    pub flag: Flag,

    #[builder(default)]
    pub tags: Vec<Tag>,

    #[builder(default)]
    pub meta: MetaData,
}

/// A dated, balanced set of postings.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Transaction {
    pub metadata: TransactionMetaData,

    #[builder(default)]
    pub postings: Vec<Posting>,
}

// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Largest residual tolerated for a commodity whose finest amount has `decimal_digits`
/// digits: half of the last digit, or nothing at all for integer amounts.
pub fn tolerance(decimal_digits: u32) -> Decimal {
    match decimal_digits {
        0 => Decimal::ZERO,
        d => Decimal::new(5, (d + 1).min(MAX_SCALE)),
    }
}

impl Transaction {
    pub fn date(&self) -> NaiveDate {
        self.metadata.date
    }

    /// Per-commodity sum of posting weights along with the largest number of
    /// decimal digits contributing to it.
    pub fn residuals(&self) -> BTreeMap<&str, (Decimal, u32)> {
        let mut sums: BTreeMap<&str, (Decimal, u32)> = BTreeMap::new();
        for posting in &self.postings {
            let weight = posting.weight();
            let entry = sums.entry(weight.commodity).or_insert((Decimal::ZERO, 0));
            entry.0 = entry.0.saturating_add(weight.number);
            entry.1 = entry.1.max(weight.decimal_digits);
        }
        sums
    }

    /// Residuals exceeding their tolerance, keyed by commodity. Empty when balanced.
    pub fn imbalance(&self) -> BTreeMap<String, Decimal> {
        self.residuals()
            .into_iter()
            .filter(|(_, (sum, digits))| sum.abs() > tolerance(*digits))
            .map(|(commodity, (sum, _))| (commodity.to_string(), sum))
            .collect()
    }

    pub fn is_balanced(&self) -> bool {
        self.imbalance().is_empty()
    }

    /// Checks that the transaction has postings, balances, and only posts to
    /// accounts of `ledger` that accept the posting on the transaction date.
    pub fn validate(&self, ledger: &Ledger) -> LedgerResult<()> {
        if self.postings.is_empty() {
            return Err(LedgerError::NoPostings(self.date()));
        }
        if let Some((commodity, residual)) = self.imbalance().into_iter().next() {
            return Err(LedgerError::Unbalanced {
                date: self.date(),
                commodity,
                residual,
            });
        }
        for posting in &self.postings {
            let account = ledger
                .account(posting.account.full_name())
                .ok_or_else(|| LedgerError::UnknownAccount(posting.account.to_string()))?;
            account.validate_posting(posting, self.date())?;
        }
        Ok(())
    }

    pub fn is_valid(&self, ledger: &Ledger) -> bool {
        self.validate(ledger).is_ok()
    }
}
