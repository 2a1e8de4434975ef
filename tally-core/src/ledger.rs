use indexmap::IndexMap;
use log::trace;

use super::account::Account;
use super::commodity::Commodity;
use super::directives::{Balance, BcOption, Custom, Event, Price};
use super::error::{LedgerError, LedgerResult};
use super::metadata::Tag;
use super::posting::{TransactionId, TransactionPosting};
use super::transaction::Transaction;

/// The in-memory ledger: every entity read from a file plus the errors found on the way.
///
/// Commodities and accounts are inserted once; inserting the same name again is an
/// error. Transactions, balances and the value directives are appended as given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    accounts: IndexMap<String, Account>,
    commodities: IndexMap<String, Commodity>,
    tags: IndexMap<String, Tag>,
    transactions: Vec<Transaction>,
    prices: Vec<Price>,
    balances: Vec<Balance>,
    options: Vec<BcOption>,
    plugins: Vec<String>,
    custom: Vec<Custom>,
    events: Vec<Event>,
    errors: Vec<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_commodity(&mut self, commodity: Commodity) -> LedgerResult<()> {
        if self.commodities.contains_key(&commodity.symbol) {
            return Err(LedgerError::DuplicateCommodity(commodity.symbol));
        }
        trace!("adding commodity {}", commodity.symbol);
        self.commodities.insert(commodity.symbol.clone(), commodity);
        Ok(())
    }

    pub fn add_account(&mut self, account: Account) -> LedgerResult<()> {
        let name = account.name.full_name();
        if self.accounts.contains_key(name) {
            return Err(LedgerError::DuplicateAccount(name.to_string()));
        }
        trace!("adding account {}", name);
        self.accounts.insert(name.to_string(), account);
        Ok(())
    }

    pub fn add_price(&mut self, price: Price) -> LedgerResult<()> {
        let duplicate = self.prices.iter().any(|p| {
            p.date == price.date
                && p.commodity == price.commodity
                && p.amount.commodity == price.amount.commodity
        });
        if duplicate {
            return Err(LedgerError::DuplicatePrice {
                date: price.date,
                commodity: price.commodity,
                currency: price.amount.commodity,
            });
        }
        self.prices.push(price);
        Ok(())
    }

    /// Appends a transaction, registering its tags, and returns its handle.
    pub fn add_transaction(&mut self, transaction: Transaction) -> TransactionId {
        for tag in &transaction.metadata.tags {
            if !self.tags.contains_key(tag.name()) {
                self.tags.insert(tag.name().to_string(), tag.clone());
            }
        }
        self.transactions.push(transaction);
        TransactionId(self.transactions.len() - 1)
    }

    pub fn add_balance(&mut self, balance: Balance) {
        self.balances.push(balance);
    }

    pub fn add_option(&mut self, option: BcOption) {
        self.options.push(option);
    }

    pub fn add_plugin(&mut self, plugin: String) {
        self.plugins.push(plugin);
    }

    pub fn add_custom(&mut self, custom: Custom) {
        self.custom.push(custom);
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn commodities(&self) -> impl Iterator<Item = &Commodity> {
        self.commodities.values()
    }

    pub fn commodity(&self, symbol: &str) -> Option<&Commodity> {
        self.commodities.get(symbol)
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(id.0)
    }

    /// Every posting of every transaction, each paired with its transaction handle.
    pub fn postings(&self) -> impl Iterator<Item = TransactionPosting<'_>> {
        self.transactions
            .iter()
            .enumerate()
            .flat_map(|(index, transaction)| {
                transaction
                    .postings
                    .iter()
                    .map(move |posting| TransactionPosting {
                        transaction_id: TransactionId(index),
                        posting,
                    })
            })
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn options(&self) -> &[BcOption] {
        &self.options
    }

    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    pub fn custom(&self) -> &[Custom] {
        &self.custom
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Runs the model checks a parse does not: transaction validity and the
    /// existence of accounts named by balance assertions. `errors` is left untouched.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for transaction in &self.transactions {
            if let Err(e) = transaction.validate(self) {
                problems.push(format!(
                    "{} (transaction \"{}\" \"{}\")",
                    e, transaction.metadata.payee, transaction.metadata.narration
                ));
            }
        }
        for balance in &self.balances {
            if self.account(balance.account.full_name()).is_none() {
                problems.push(format!(
                    "{} (balance on {})",
                    LedgerError::UnknownAccount(balance.account.to_string()),
                    balance.date
                ));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::posting::Posting;
    use crate::transaction::TransactionMetaData;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(name: &str) -> Account {
        Account::builder()
            .name(name.parse().unwrap())
            .opening(Some(date(2020, 1, 1)))
            .build()
    }

    fn price(commodity: &str, number: i64) -> Price {
        Price::builder()
            .date(date(2020, 1, 1))
            .commodity(commodity.to_string())
            .amount(Amount::new(Decimal::new(number, 2), "CAD", 2))
            .build()
    }

    fn transaction(tags: &[&str], account: &str) -> Transaction {
        Transaction::builder()
            .metadata(
                TransactionMetaData::builder()
                    .date(date(2020, 2, 1))
                    .narration("Groceries".to_string())
                    .tags(tags.iter().map(|t| Tag::from(*t)).collect())
                    .build(),
            )
            .postings(vec![
                Posting::builder()
                    .account(account.parse().unwrap())
                    .amount(Amount::new(Decimal::new(500, 2), "CAD", 2))
                    .build(),
                Posting::builder()
                    .account("Assets:Cash".parse().unwrap())
                    .amount(Amount::new(Decimal::new(-500, 2), "CAD", 2))
                    .build(),
            ])
            .build()
    }

    #[test]
    fn duplicate_commodity() {
        let mut ledger = Ledger::new();
        let cad = Commodity::builder().symbol("CAD".to_string()).build();
        assert!(ledger.add_commodity(cad.clone()).is_ok());
        assert_eq!(
            ledger.add_commodity(cad),
            Err(LedgerError::DuplicateCommodity("CAD".to_string()))
        );
        assert_eq!(ledger.commodities().count(), 1);
    }

    #[test]
    fn duplicate_account() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_account(account("Assets:Cash")).is_ok());
        assert_eq!(
            ledger.add_account(account("Assets:Cash")),
            Err(LedgerError::DuplicateAccount("Assets:Cash".to_string()))
        );
        assert!(ledger.account("Assets:Cash").is_some());
    }

    #[test]
    fn duplicate_price() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_price(price("USD", 133)).is_ok());
        assert!(ledger.add_price(price("EUR", 150)).is_ok());
        assert!(ledger.add_price(price("USD", 134)).is_err());
        assert_eq!(ledger.prices().len(), 2);
    }

    #[test]
    fn tags_registered_once() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(transaction(&["food", "weekly"], "Expenses:Food"));
        ledger.add_transaction(transaction(&["food"], "Expenses:Food"));
        let tags: Vec<&str> = ledger.tags().map(Tag::name).collect();
        assert_eq!(tags, vec!["food", "weekly"]);
    }

    #[test]
    fn postings_refer_back_to_transaction() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(transaction(&[], "Expenses:Food"));
        let id = ledger.add_transaction(transaction(&[], "Expenses:Rent"));
        assert_eq!(id, TransactionId(1));

        let postings: Vec<_> = ledger.postings().collect();
        assert_eq!(postings.len(), 4);
        let rent = postings
            .iter()
            .find(|p| p.posting.account.full_name() == "Expenses:Rent")
            .unwrap();
        assert_eq!(rent.transaction_id, id);
        assert_eq!(rent.transaction(&ledger), ledger.transaction(id));
    }

    #[test]
    fn validate_reports_unknown_accounts() {
        let mut ledger = Ledger::new();
        ledger.add_account(account("Assets:Cash")).unwrap();
        ledger.add_transaction(transaction(&[], "Expenses:Food"));
        ledger.add_balance(
            Balance::builder()
                .date(date(2020, 3, 1))
                .account("Assets:Bank".parse().unwrap())
                .amount(Amount::new(Decimal::ZERO, "CAD", 0))
                .build(),
        );

        let problems = ledger.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("Expenses:Food"));
        assert!(problems[1].contains("Assets:Bank"));
        assert!(ledger.errors().is_empty());

        ledger.add_account(account("Expenses:Food")).unwrap();
        ledger.add_account(account("Assets:Bank")).unwrap();
        assert!(ledger.validate().is_empty());
    }
}
