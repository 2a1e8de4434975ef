use chrono::NaiveDate;

use super::amount::Amount;
use super::error::{LedgerError, LedgerResult};

/// Identifies an inventory lot of a posting, written in curly brackets:
///
/// ```text
/// 2014-02-11 * "Broker" "Bought shares"
///   Assets:Brokerage     10 HOOL {518.73 USD, 2014-02-11, "first-lot"}
///   Assets:Cash     -5187.30 USD
/// ```
///
/// Every component is optional. Cost amounts are never negative.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cost {
    pub amount: Option<Amount>,
    pub date: Option<NaiveDate>,
    pub label: Option<String>,
}

impl Cost {
    pub fn new(
        amount: Option<Amount>,
        date: Option<NaiveDate>,
        label: Option<String>,
    ) -> LedgerResult<Cost> {
        if let Some(amount) = amount.as_ref().filter(|a| a.is_negative()) {
            return Err(LedgerError::NegativeCost(amount.to_string()));
        }
        Ok(Cost {
            amount,
            date,
            label,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.date.is_none() && self.label.is_none()
    }
}
