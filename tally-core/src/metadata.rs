use std::collections::BTreeMap;
use std::fmt;

/// Metadata that can be attached to directives and postings.
///
/// ```text
/// 1867-01-01 commodity CAD
///   name: "Canadian Dollar"
/// ```
pub type MetaData = BTreeMap<String, String>;

/// Tag associated with a transaction. Tags allow you to mark a subset of transactions,
/// enabling filtering on a tag(s) when generating a report.
///
/// In the below transaction, #berlin-trip-2014 is the tag:
///
/// ```text
/// 2014-04-23 * "Airline" "Flight to Berlin" #berlin-trip-2014
///   Expenses:Flights              1230.27 USD
///   Liabilities:CreditCard       -1230.27 USD
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Tag(pub String);

impl Tag {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag(s.to_string())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
