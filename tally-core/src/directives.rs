use chrono::NaiveDate;
use typed_builder::TypedBuilder;

use super::account::AccountName;
use super::account_types::AccountType;
use super::amount::Amount;
use super::metadata::MetaData;

/// Represents a `price` directive, the exchange rate of a commodity on a date.
///
/// ```text
/// 2014-07-09 price HOOL 579.18 USD
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Price {
    pub date: NaiveDate,

    /// Commodity being priced.
    pub commodity: String,

    /// Price of one unit of `commodity`.
    pub amount: Amount,

    #[builder(default)]
    pub meta: MetaData,
}

/// Represents a `balance` directive, which asserts the amount of a commodity held by an
/// account at the beginning of a date.
///
/// ```text
/// 2014-08-09 balance Assets:Cash     562.00 USD
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Balance {
    pub date: NaiveDate,

    pub account: AccountName,

    pub amount: Amount,

    #[builder(default)]
    pub meta: MetaData,
}

/// Represents an `option`, a configuration point global to the file.
///
/// ```text
/// option "title" "Ed’s Personal Ledger"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct BcOption {
    pub name: String,
    pub value: String,
}

impl BcOption {
    /// The root account renamed by this option, e.g. `option "name_assets" "Aktiva"`.
    pub fn root_name_change(&self) -> Option<(AccountType, &str)> {
        AccountType::ALL
            .iter()
            .find(|ty| ty.option_name() == self.name)
            .map(|ty| (*ty, self.value.as_str()))
    }
}

/// Represents an `event` directive, tracking the value of some variable over time.
///
/// ```text
/// 2014-07-09 event "location" "Paris, France"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Event {
    pub date: NaiveDate,
    pub name: String,
    pub value: String,

    #[builder(default)]
    pub meta: MetaData,
}

/// Represents a `custom` directive with an arbitrary list of values.
///
/// ```text
/// 2014-07-09 custom "budget" "monthly" "Expenses:Food" "400.00 CAD"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Custom {
    pub date: NaiveDate,
    pub name: String,

    #[builder(default)]
    pub values: Vec<String>,

    #[builder(default)]
    pub meta: MetaData,
}
