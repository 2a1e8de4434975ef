use chrono::NaiveDate;
use typed_builder::TypedBuilder;

use super::metadata::MetaData;

/// Represents a `commodity` directive. Declaring a commodity is optional, but it is
/// where commodity-specific metadata lives.
///
/// ```text
/// 1867-01-01 commodity CAD
///   name: "Canadian Dollar"
///   asset-class: "cash"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Commodity {
    pub symbol: String,

    /// Date the commodity was declared.
    #[builder(default)]
    pub opening: Option<NaiveDate>,

    #[builder(default)]
    pub meta: MetaData,
}
