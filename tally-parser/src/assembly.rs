use log::debug;

use tally_core as tc;

use crate::scanner::{Parsed, ParsingResult};

fn skip(ledger: &mut tc::Ledger, line: usize, source: &str, err: tc::LedgerError) {
    let message = format!("{} (line {})", err, line);
    debug!("skipping {:?}: {}", source, message);
    ledger.push_error(message);
}

/// Builds a [`Ledger`](tc::Ledger) from everything the scanner read.
///
/// Entities are sorted by date, keeping file order among equal dates, and inserted so
/// that commodities come before the accounts, and accounts before the prices, balances
/// and transactions that refer to them. An entity that cannot be inserted is reported
/// in the ledger's errors and the rest are still inserted.
pub fn assemble(result: ParsingResult) -> tc::Ledger {
    let ParsingResult {
        mut accounts,
        mut commodities,
        mut prices,
        mut balances,
        mut transactions,
        options,
        plugins,
        events,
        custom,
        errors,
    } = result;

    accounts.sort_by_key(|a| a.value.opening.or(a.value.closing));
    commodities.sort_by_key(|c| c.value.opening);
    prices.sort_by_key(|p| p.value.date);
    balances.sort_by_key(|b| b.value.date);
    transactions.sort_by_key(|t| t.value.date());

    let mut ledger = tc::Ledger::new();
    for error in errors {
        ledger.push_error(error);
    }
    for option in options {
        ledger.add_option(option.value);
    }
    for plugin in plugins {
        ledger.add_plugin(plugin.value);
    }
    for custom in custom {
        ledger.add_custom(custom.value);
    }
    for event in events {
        ledger.add_event(event.value);
    }

    for commodity in commodities {
        let Parsed { line, source, value } = commodity;
        if let Err(err) = ledger.add_commodity(value) {
            skip(&mut ledger, line, &source, err);
        }
    }
    for account in accounts {
        let Parsed { line, source, value } = account;
        if let Err(err) = ledger.add_account(value) {
            skip(&mut ledger, line, &source, err);
        }
    }
    for price in prices {
        let Parsed { line, source, value } = price;
        if let Err(err) = ledger.add_price(value) {
            skip(&mut ledger, line, &source, err);
        }
    }

    for balance in balances {
        ledger.add_balance(balance.value);
    }
    for transaction in transactions {
        ledger.add_transaction(transaction.value);
    }
    ledger
}
