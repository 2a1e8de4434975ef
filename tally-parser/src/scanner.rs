use std::collections::HashMap;

use log::{debug, warn};

use tally_core as tc;

use crate::directives::{self, is_indented};
use crate::error::{ParseError, ParseResult};
use crate::ParseState;

/// A value together with the line it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed<T> {
    /// 1-based line number of the directive.
    pub line: usize,
    pub source: String,
    pub value: T,
}

/// Everything read from a ledger in file order, before any sorting or validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsingResult {
    pub accounts: Vec<Parsed<tc::Account>>,
    pub commodities: Vec<Parsed<tc::Commodity>>,
    pub prices: Vec<Parsed<tc::Price>>,
    pub balances: Vec<Parsed<tc::Balance>>,
    pub transactions: Vec<Parsed<tc::Transaction>>,
    pub options: Vec<Parsed<tc::BcOption>>,
    pub plugins: Vec<Parsed<String>>,
    pub events: Vec<Parsed<tc::Event>>,
    pub custom: Vec<Parsed<tc::Custom>>,
    pub errors: Vec<String>,
}

fn parsed<T>(index: usize, line: &str, value: T) -> Parsed<T> {
    Parsed {
        line: index + 1,
        source: line.to_string(),
        value,
    }
}

fn is_skippable(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with(';')
}

/// Walks the lines of a ledger with a single forward cursor.
///
/// A transaction header takes the metadata and posting lines below it. Any other line
/// is tried against each single-line directive in turn. Lines that match nothing are
/// recorded as errors and scanning goes on.
pub struct Scanner<'l> {
    lines: Vec<&'l str>,
    state: ParseState,
    result: ParsingResult,
    account_index: HashMap<String, usize>,
}

impl<'l> Scanner<'l> {
    pub fn new(input: &'l str) -> Self {
        Self::with_state(input, ParseState::new())
    }

    pub fn with_state(input: &'l str, state: ParseState) -> Self {
        Scanner {
            lines: input.lines().collect(),
            state,
            result: ParsingResult::default(),
            account_index: HashMap::new(),
        }
    }

    pub fn scan(mut self) -> ParsingResult {
        let mut cursor = 0;
        while let Some(line) = self.lines.get(cursor).copied() {
            if is_skippable(line) {
                cursor += 1;
                continue;
            }
            cursor = match self.transaction(cursor) {
                Some(next) => next,
                None => self.directive(cursor),
            };
        }
        debug!(
            "scanned {} lines: {} transactions, {} accounts, {} commodities, {} errors",
            self.lines.len(),
            self.result.transactions.len(),
            self.result.accounts.len(),
            self.result.commodities.len(),
            self.result.errors.len()
        );
        self.result
    }

    fn record(&mut self, message: String) {
        warn!("{}", message);
        self.result.errors.push(message);
    }

    fn record_error(&mut self, err: ParseError, index: usize) {
        self.record(err.at_line(index + 1).to_string());
    }

    /// Collects the metadata lines following line `index`.
    ///
    /// Returns the merged entries and the number of lines taken. Blank and comment
    /// lines are passed over but only count when more metadata follows them.
    fn metadata(&self, index: usize) -> (tc::MetaData, usize) {
        let mut meta = tc::MetaData::new();
        let mut consumed = 0;
        let mut offset = 1;
        while let Some(line) = self.lines.get(index + offset) {
            if let Some(entry) = directives::metadata(line) {
                meta.extend(entry);
                consumed = offset;
            } else if !is_skippable(line) {
                break;
            }
            offset += 1;
        }
        (meta, consumed)
    }

    /// Reads a transaction starting at line `index`, returning the index of the first
    /// line after it, or `None` if the line is no transaction header.
    fn transaction(&mut self, index: usize) -> Option<usize> {
        let line = self.lines[index];
        let header = directives::transaction_header(line, tc::MetaData::new(), &self.state);
        let header = match header {
            Ok(None) => return None,
            Ok(Some(header)) => Some(header),
            Err(err) => {
                self.record_error(err, index);
                None
            }
        };
        let (meta, consumed) = self.metadata(index);
        let (postings, next) = self.postings(index + consumed + 1);

        if let Some(mut header) = header {
            header.meta = meta;
            self.result.transactions.push(Parsed {
                line: index + 1,
                source: line.to_string(),
                value: tc::Transaction {
                    metadata: header,
                    postings,
                },
            });
        }
        Some(next)
    }

    /// Reads postings from line `index` on. A posting that fails to parse is recorded
    /// and skipped together with its metadata; the first line that is no posting ends
    /// the transaction.
    fn postings(&mut self, mut index: usize) -> (Vec<tc::Posting>, usize) {
        let mut postings = Vec::new();
        while let Some(line) = self.lines.get(index).copied() {
            if is_skippable(line) {
                if is_indented(line) {
                    index += 1;
                    continue;
                }
                break;
            }
            let (meta, consumed) = self.metadata(index);
            match directives::posting(line, meta, &self.state) {
                Ok(Some(posting)) => postings.push(posting),
                Ok(None) => break,
                Err(err) => self.record_error(err, index),
            }
            index += consumed + 1;
        }
        (postings, index)
    }

    /// Reads the single-line directive at line `index` and its metadata, returning the
    /// index of the first line after them.
    fn directive(&mut self, index: usize) -> usize {
        let line = self.lines[index];
        let (meta, consumed) = self.metadata(index);
        match self.dispatch(index, line, meta) {
            Ok(true) => {}
            Ok(false) => self.record(format!("Invalid format in line {}: {}", index + 1, line)),
            Err(err) => self.record_error(err, index),
        }
        index + consumed + 1
    }

    fn dispatch(&mut self, index: usize, line: &str, meta: tc::MetaData) -> ParseResult<bool> {
        if let Some(account) = directives::account_directive(line, meta.clone(), &self.state)? {
            self.merge_account(parsed(index, line, account));
        } else if let Some(price) = directives::price_directive(line, meta.clone(), &self.state)? {
            self.result.prices.push(parsed(index, line, price));
        } else if let Some(commodity) = directives::commodity_directive(line, meta.clone(), &self.state)? {
            self.result.commodities.push(parsed(index, line, commodity));
        } else if let Some(balance) = directives::balance_directive(line, meta.clone(), &self.state)? {
            self.result.balances.push(parsed(index, line, balance));
        } else if let Some(option) = directives::option_directive(line)? {
            let applied = self.state.apply_option(&option);
            self.result.options.push(parsed(index, line, option));
            applied?;
        } else if let Some(plugin) = directives::plugin_directive(line)? {
            self.result.plugins.push(parsed(index, line, plugin));
        } else if let Some(event) = directives::event_directive(line, meta.clone(), &self.state)? {
            self.result.events.push(parsed(index, line, event));
        } else if let Some(custom) = directives::custom_directive(line, meta, &self.state)? {
            self.result.custom.push(parsed(index, line, custom));
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    /// Keeps a single record per account name, folding a close into its open and the
    /// other way round.
    fn merge_account(&mut self, account: Parsed<tc::Account>) {
        let name = account.value.name.full_name().to_string();
        let index = match self.account_index.get(&name) {
            Some(&index) => index,
            None => {
                self.account_index.insert(name, self.result.accounts.len());
                self.result.accounts.push(account);
                return;
            }
        };

        let line = account.line;
        let incoming = account.value;
        let existing = &mut self.result.accounts[index].value;
        let message = match (incoming.opening, incoming.closing) {
            (_, Some(_)) if existing.closing.is_some() => {
                Some(format!("Second closing for account {}", name))
            }
            (Some(_), _) if existing.opening.is_some() => {
                Some(format!("Second opening for account {}", name))
            }
            (_, Some(closing)) => match existing.opening {
                Some(opening) if closing < opening => Some(format!(
                    "Account {} closed on {} before its opening on {}",
                    name, closing, opening
                )),
                _ => {
                    existing.closing = Some(closing);
                    None
                }
            },
            (Some(opening), None) => match existing.closing {
                Some(closing) if closing < opening => Some(format!(
                    "Account {} closed on {} before its opening on {}",
                    name, closing, opening
                )),
                _ => {
                    existing.opening = Some(opening);
                    existing.commodity = incoming.commodity;
                    existing.booking_method = incoming.booking_method;
                    existing.meta = incoming.meta;
                    None
                }
            },
            (None, None) => None,
        };
        if let Some(message) = message {
            self.record(format!("{} (line {})", message, line));
        }
    }
}
