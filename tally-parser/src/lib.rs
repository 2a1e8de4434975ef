//! Parser for tally ledger files.
//!
//! Parsing never fails as a whole: every line that cannot be understood ends up in
//! [`Ledger::errors`](tally_core::Ledger::errors) and the rest of the file is still read.
//!
//! ```text
//! 2020-06-13 open Assets:Checking
//! 2020-06-13 open Income:Job
//! 2020-06-13 * "Employer" "Paycheck"
//!   Assets:Checking 10.00 CAD
//!   Income:Job -10.00 CAD
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use pest_derive::Parser as PestParser;

use tally_core as tc;

use error::ParseResult;

pub mod assembly;
pub mod directives;
pub mod error;
pub mod number;
pub mod scanner;

pub use assembly::assemble;
pub use error::{ParseError, ParseErrorKind};
pub use scanner::{Parsed, ParsingResult, Scanner};

#[derive(PestParser)]
#[grammar = "tally.pest"]
pub struct TallyParser;

/// Settings that change how the following lines are read.
#[derive(Clone, Debug, Default)]
pub struct ParseState {
    root_names: tc::RootNames,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_names(&self) -> &tc::RootNames {
        &self.root_names
    }

    /// Applies options such as `option "name_assets" "Aktiva"`.
    pub fn apply_option(&mut self, option: &tc::BcOption) -> ParseResult<()> {
        if let Some((account_type, name)) = option.root_name_change() {
            self.root_names.rename(account_type, name)?;
            debug!("root account {:?} renamed to {}", account_type, name);
        }
        Ok(())
    }
}

/// Parses the text of a ledger.
pub fn parse(input: &str) -> tc::Ledger {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    assemble(Scanner::new(input).scan())
}

/// Reads and parses a ledger file. Only failing to read the file is an error; problems
/// inside the file are reported through the ledger's errors.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<tc::Ledger> {
    let path = path.as_ref();
    debug!("reading ledger {}", path.display());
    let input = fs::read_to_string(path)?;
    Ok(parse(&input))
}
