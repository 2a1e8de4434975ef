use std::fmt;

/// Transaction flag, written between the date and the payee.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Flag {
    /// `*` or `txn`
    #[default]
    Complete,
    /// `!`
    Incomplete,
    Other(String),
}

impl From<&str> for Flag {
    fn from(s: &str) -> Self {
        match s {
            "*" | "txn" => Flag::Complete,
            "!" => Flag::Incomplete,
            _ => Flag::Other(s.to_string()),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Complete => f.write_str("*"),
            Flag::Incomplete => f.write_str("!"),
            Flag::Other(s) => f.write_str(s),
        }
    }
}
