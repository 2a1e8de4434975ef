use std::fmt;

use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

/// A number of units of a certain commodity.
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct Amount {
    /// The value of the amount.
    pub number: Decimal,

    /// The commodity of the amount.
    pub commodity: String,

    /// Digits after the decimal point as written in the source. Drives the
    /// tolerance used when balancing transactions.
    pub decimal_digits: u32,
}

impl Amount {
    pub fn new(number: Decimal, commodity: impl Into<String>, decimal_digits: u32) -> Self {
        Amount {
            number,
            commodity: commodity.into(),
            decimal_digits,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.number.is_sign_negative() && !self.number.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.commodity)
    }
}
