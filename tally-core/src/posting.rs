use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use super::account::AccountName;
use super::amount::Amount;
use super::cost::Cost;
use super::ledger::Ledger;
use super::metadata::MetaData;
use super::transaction::Transaction;

/// Represents a transaction posting.  Postings represent a single amount being deposited to or
/// withdrawn from an account.
///
/// Postings can optionally have a price. A per-unit price follows `@`:
///
/// ```text
/// 2012-11-03 * "Bank" "Transfer to account in Canada"
///   Assets:MyBank:Checking            -400.00 USD @ 1.09 CAD
///   Assets:FR:SocGen:Checking          436.00 CAD
/// ```
///
/// A total price follows `@@`. It is kept as written in `total_price`, and `price` holds it
/// divided by the number of units.
///
/// ```text
/// 2012-11-03 * "Bank" "Transfer to account in Canada"
///   Assets:MyBank:Checking            -400.00 USD @@ 436.00 CAD
///   Assets:FR:SocGen:Checking          436.00 CAD
/// ```
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Posting {
    /// Account being posted to.
    pub account: AccountName,

    /// The amount being posted.
    pub amount: Amount,

    /// Per-unit price of this posting.
    #[builder(default)]
    pub price: Option<Amount>,

    /// The `@@` amount as written, when the price was given as a total.
    #[builder(default)]
    pub total_price: Option<Amount>,

    /// The lot this posting adds to or reduces.
    #[builder(default)]
    pub cost: Option<Cost>,

    #[builder(default)]
    pub meta: MetaData,
}

/// What a posting contributes to the balance of its transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Weight<'a> {
    pub commodity: &'a str,
    pub number: Decimal,
    pub decimal_digits: u32,
}

impl Posting {
    /// The posting's weight: `price × units` in the price commodity when a price is
    /// attached, otherwise the posted amount itself.
    pub fn weight(&self) -> Weight<'_> {
        match &self.price {
            Some(price) => Weight {
                commodity: &price.commodity,
                number: price.number.saturating_mul(self.amount.number),
                decimal_digits: price.decimal_digits,
            },
            None => Weight {
                commodity: &self.amount.commodity,
                number: self.amount.number,
                decimal_digits: self.amount.decimal_digits,
            },
        }
    }
}

/// Position of a transaction inside a [`Ledger`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub usize);

/// A posting together with the transaction it belongs to.
#[derive(Copy, Clone, Debug)]
pub struct TransactionPosting<'l> {
    pub transaction_id: TransactionId,
    pub posting: &'l Posting,
}

impl<'l> TransactionPosting<'l> {
    pub fn transaction<'a>(&self, ledger: &'a Ledger) -> Option<&'a Transaction> {
        ledger.transaction(self.transaction_id)
    }
}
