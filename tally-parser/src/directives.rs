//! One parser per kind of line.
//!
//! Every parser takes a single line, the metadata collected from the lines below it
//! and the current [`ParseState`]. `Ok(None)` means the line is not of that kind;
//! an error means it is, but something in it is wrong.

use chrono::NaiveDate;
use pest::iterators::{Pair, Pairs};
use pest::Parser;

use tally_core as tc;

use crate::error::{ParseError, ParseResult};
use crate::number::parse_decimal;
use crate::{ParseState, Rule, TallyParser};

/// Matches the whole `line` against `rule`, returning the captured pairs.
fn captures(rule: Rule, line: &str) -> Option<Pairs<'_, Rule>> {
    TallyParser::parse(rule, line)
        .ok()?
        .next()
        .map(Pair::into_inner)
}

fn optional_rule<'i>(rule: Rule, pairs: &mut Pairs<'i, Rule>) -> Option<Pair<'i, Rule>> {
    match pairs.peek() {
        Some(ref p) if p.as_rule() == rule => pairs.next(),
        _ => None,
    }
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> ParseResult<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| ParseError::invalid_state(expected))
}

pub(crate) fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

fn date(pair: Pair<'_, Rule>) -> ParseResult<NaiveDate> {
    debug_assert!(pair.as_rule() == Rule::date);
    NaiveDate::parse_from_str(pair.as_str(), "%Y-%m-%d")
        .map_err(|e| ParseError::invalid_input(format!("invalid date {}: {}", pair.as_str(), e)))
}

fn account(pair: Pair<'_, Rule>, state: &ParseState) -> ParseResult<tc::AccountName> {
    debug_assert!(pair.as_rule() == Rule::account);
    Ok(tc::AccountName::parse(pair.as_str(), state.root_names())?)
}

fn amount(pair: Pair<'_, Rule>) -> ParseResult<tc::Amount> {
    debug_assert!(pair.as_rule() == Rule::amount);
    let mut inner = pair.into_inner();
    let (number, decimal_digits) = parse_decimal(next_pair(&mut inner, "number")?.as_str())?;
    let commodity = next_pair(&mut inner, "commodity")?.as_str();
    Ok(tc::Amount::new(number, commodity, decimal_digits))
}

fn quoted(pair: Pair<'_, Rule>) -> ParseResult<&str> {
    debug_assert!(pair.as_rule() == Rule::quoted);
    Ok(pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::invalid_state("quoted string"))?
        .as_str())
}

/// `2020-01-01 open Assets:Checking CAD "STRICT"` or `2020-12-31 close Assets:Checking`.
///
/// A close produces an account carrying only a closing date; the scanner merges it
/// with the matching open.
pub fn account_directive(
    line: &str,
    meta: tc::MetaData,
    state: &ParseState,
) -> ParseResult<Option<tc::Account>> {
    let mut pairs = match captures(Rule::account_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    let date = date(next_pair(&mut pairs, "date")?)?;
    let action = next_pair(&mut pairs, "open or close")?.as_str();
    let name = account(next_pair(&mut pairs, "account")?, state)?;
    let commodity = optional_rule(Rule::commodity, &mut pairs).map(|p| p.as_str().to_string());
    let booking = optional_rule(Rule::quoted, &mut pairs).map(quoted).transpose()?;

    let account = match action {
        "open" => tc::Account::builder()
            .name(name)
            .opening(Some(date))
            .commodity(commodity)
            .booking_method(booking.and_then(|b| b.parse().ok()))
            .meta(meta)
            .build(),
        _ if commodity.is_some() || booking.is_some() => return Ok(None),
        _ => tc::Account::builder()
            .name(name)
            .closing(Some(date))
            .meta(meta)
            .build(),
    };
    Ok(Some(account))
}

/// `2020-01-01 price USD 1.33 CAD`
pub fn price_directive(
    line: &str,
    meta: tc::MetaData,
    _state: &ParseState,
) -> ParseResult<Option<tc::Price>> {
    let mut pairs = match captures(Rule::price_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(
        tc::Price::builder()
            .date(date(next_pair(&mut pairs, "date")?)?)
            .commodity(next_pair(&mut pairs, "commodity")?.as_str().to_string())
            .amount(amount(next_pair(&mut pairs, "amount")?)?)
            .meta(meta)
            .build(),
    ))
}

/// `1867-07-01 commodity CAD`
pub fn commodity_directive(
    line: &str,
    meta: tc::MetaData,
    _state: &ParseState,
) -> ParseResult<Option<tc::Commodity>> {
    let mut pairs = match captures(Rule::commodity_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(
        tc::Commodity::builder()
            .opening(Some(date(next_pair(&mut pairs, "date")?)?))
            .symbol(next_pair(&mut pairs, "commodity")?.as_str().to_string())
            .meta(meta)
            .build(),
    ))
}

/// `2020-07-01 balance Assets:Checking 10.00 CAD`
pub fn balance_directive(
    line: &str,
    meta: tc::MetaData,
    state: &ParseState,
) -> ParseResult<Option<tc::Balance>> {
    let mut pairs = match captures(Rule::balance_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(
        tc::Balance::builder()
            .date(date(next_pair(&mut pairs, "date")?)?)
            .account(account(next_pair(&mut pairs, "account")?, state)?)
            .amount(amount(next_pair(&mut pairs, "amount")?)?)
            .meta(meta)
            .build(),
    ))
}

/// `option "operating_currency" "CAD"`
pub fn option_directive(line: &str) -> ParseResult<Option<tc::BcOption>> {
    let mut pairs = match captures(Rule::option_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(
        tc::BcOption::builder()
            .name(quoted(next_pair(&mut pairs, "option name")?)?.to_string())
            .value(quoted(next_pair(&mut pairs, "option value")?)?.to_string())
            .build(),
    ))
}

/// `plugin "tally.plugins.check_commodity"`
pub fn plugin_directive(line: &str) -> ParseResult<Option<String>> {
    let mut pairs = match captures(Rule::plugin_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(quoted(next_pair(&mut pairs, "plugin name")?)?.to_string()))
}

/// `2014-07-09 event "location" "Paris, France"`
pub fn event_directive(
    line: &str,
    meta: tc::MetaData,
    _state: &ParseState,
) -> ParseResult<Option<tc::Event>> {
    let mut pairs = match captures(Rule::event_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    Ok(Some(
        tc::Event::builder()
            .date(date(next_pair(&mut pairs, "date")?)?)
            .name(quoted(next_pair(&mut pairs, "event name")?)?.to_string())
            .value(quoted(next_pair(&mut pairs, "event value")?)?.to_string())
            .meta(meta)
            .build(),
    ))
}

/// `2020-01-01 custom "budget" "Expenses:Food" "monthly" 400.00 CAD`
///
/// The values are whatever lies between the quotes: each run is trimmed and empty
/// runs are dropped.
pub fn custom_directive(
    line: &str,
    meta: tc::MetaData,
    _state: &ParseState,
) -> ParseResult<Option<tc::Custom>> {
    let mut pairs = match captures(Rule::custom_directive, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    let date = date(next_pair(&mut pairs, "date")?)?;
    let name = quoted(next_pair(&mut pairs, "custom name")?)?.to_string();
    let mut values = Vec::new();
    for value in pairs.filter(|p| p.as_rule() == Rule::custom_value) {
        let inner = value
            .into_inner()
            .next()
            .ok_or_else(|| ParseError::invalid_state("custom value"))?;
        let text = match inner.as_rule() {
            Rule::quoted => quoted(inner)?,
            _ => inner.as_str(),
        }
        .trim();
        if !text.is_empty() {
            values.push(text.to_string());
        }
    }
    Ok(Some(
        tc::Custom::builder()
            .date(date)
            .name(name)
            .values(values)
            .meta(meta)
            .build(),
    ))
}

/// An indented `key: "value"` line.
pub fn metadata(line: &str) -> Option<tc::MetaData> {
    if !is_indented(line) {
        return None;
    }
    let mut pairs = captures(Rule::metadata_line, line)?;
    let key = pairs.next()?.as_str().to_string();
    let value = quoted(pairs.next()?).ok()?.to_string();
    Some(std::iter::once((key, value)).collect())
}

/// `2020-06-13 * "Employer" "Paycheck" #work`
///
/// With a single string, the string is the narration and the payee stays empty.
pub fn transaction_header(
    line: &str,
    meta: tc::MetaData,
    _state: &ParseState,
) -> ParseResult<Option<tc::TransactionMetaData>> {
    let mut pairs = match captures(Rule::transaction_header, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    let date = date(next_pair(&mut pairs, "date")?)?;
    let flag = tc::Flag::from(next_pair(&mut pairs, "flag")?.as_str());
    let first = quoted(next_pair(&mut pairs, "payee or narration")?)?.to_string();
    let (payee, narration) = match optional_rule(Rule::quoted, &mut pairs) {
        Some(second) => (first, quoted(second)?.to_string()),
        None => (String::new(), first),
    };
    let tags = pairs
        .filter(|p| p.as_rule() == Rule::tag)
        .map(|p| tc::Tag(p.as_str()[1..].to_string()))
        .collect();
    Ok(Some(
        tc::TransactionMetaData::builder()
            .date(date)
            .flag(flag)
            .payee(payee)
            .narration(narration)
            .tags(tags)
            .meta(meta)
            .build(),
    ))
}

/// An indented `Assets:Brokerage 10 HOOL {518.73 USD, 2014-02-11} @ 520.00 USD` line.
///
/// Cost and price may come in either order. A total price (`@@`) is divided into a per-unit
/// price and also kept as written.
pub fn posting(
    line: &str,
    meta: tc::MetaData,
    state: &ParseState,
) -> ParseResult<Option<tc::Posting>> {
    if !is_indented(line) {
        return Ok(None);
    }
    let mut pairs = match captures(Rule::posting, line) {
        Some(pairs) => pairs,
        None => return Ok(None),
    };
    let account = account(next_pair(&mut pairs, "account")?, state)?;
    let units = amount(next_pair(&mut pairs, "amount")?)?;
    let mut cost_spec = None;
    let mut price = None;
    let mut total_price = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::cost => cost_spec = Some(cost(pair)?),
            Rule::price_annotation => {
                let (per_unit, total) = price_annotation(pair, &units)?;
                price = Some(per_unit);
                total_price = total;
            }
            _ => {}
        }
    }
    Ok(Some(
        tc::Posting::builder()
            .account(account)
            .amount(units)
            .price(price)
            .total_price(total_price)
            .cost(cost_spec)
            .meta(meta)
            .build(),
    ))
}

/// Returns the per-unit price, plus the total as written for `@@`.
fn price_annotation(
    pair: Pair<'_, Rule>,
    units: &tc::Amount,
) -> ParseResult<(tc::Amount, Option<tc::Amount>)> {
    debug_assert!(pair.as_rule() == Rule::price_annotation);
    let mut inner = pair.into_inner();
    let marker = next_pair(&mut inner, "price marker")?;
    let price = amount(next_pair(&mut inner, "price amount")?)?;
    if marker.as_rule() != Rule::total_price {
        return Ok((price, None));
    }
    if units.number.is_zero() {
        return Err(ParseError::invalid_input(format!(
            "total price {} given for a zero amount",
            price
        )));
    }
    let per_unit = price
        .number
        .checked_div(units.number.abs())
        .ok_or_else(|| ParseError::invalid_input(format!("total price {} out of range", price)))?;
    let per_unit = tc::Amount::new(per_unit, price.commodity.clone(), price.decimal_digits);
    Ok((per_unit, Some(price)))
}

/// The lenient posting rule takes everything between the brackets; this checks that it
/// holds nothing but a date, an amount and a label, each at most once.
fn cost(pair: Pair<'_, Rule>) -> ParseResult<tc::Cost> {
    debug_assert!(pair.as_rule() == Rule::cost);
    let body = pair
        .into_inner()
        .next()
        .ok_or_else(|| ParseError::invalid_state("cost body"))?
        .as_str()
        .trim();
    let unexpected = || ParseError::invalid_input(format!("unexpected elements in cost {{{}}}", body));

    let components = TallyParser::parse(Rule::cost_components, body)
        .map_err(|e| unexpected().caused_by(e))?
        .next()
        .ok_or_else(|| ParseError::invalid_state("cost components"))?;

    let mut cost_amount = None;
    let mut cost_date = None;
    let mut label = None;
    for component in components.into_inner().filter(|p| p.as_rule() == Rule::cost_component) {
        let inner = component
            .into_inner()
            .next()
            .ok_or_else(|| ParseError::invalid_state("cost component"))?;
        let duplicate = match inner.as_rule() {
            Rule::date => cost_date.replace(date(inner)?).is_some(),
            Rule::amount => cost_amount.replace(amount(inner)?).is_some(),
            Rule::quoted => label.replace(quoted(inner)?.to_string()).is_some(),
            _ => return Err(unexpected()),
        };
        if duplicate {
            return Err(unexpected());
        }
    }
    Ok(tc::Cost::new(cost_amount, cost_date, label)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    macro_rules! parse_ok {
        ( $rule:ident, $input:expr ) => {
            assert_eq!(
                TallyParser::parse(Rule::$rule, $input)
                    .unwrap()
                    .as_str(),
                $input
            );
        };
        ( $rule:ident, $input:expr, $output:expr ) => {
            assert_eq!(
                TallyParser::parse(Rule::$rule, $input)
                    .unwrap()
                    .as_str(),
                $output
            );
        };
    }

    macro_rules! parse_fail {
        ( $rule:ident, $input:expr ) => {
            assert!(TallyParser::parse(Rule::$rule, $input).is_err());
        };
    }

    fn state() -> ParseState {
        ParseState::new()
    }

    fn meta(key: &str, value: &str) -> tc::MetaData {
        std::iter::once((key.to_string(), value.to_string())).collect()
    }

    fn date_of(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn grammar_date() {
        parse_ok!(date, "2019-01-12");
        parse_ok!(date, "2019-01-120", "2019-01-12");
        parse_fail!(date, "123-01-01");
        parse_fail!(date, "2020 02 02");
        parse_fail!(date, "02-02-2020");
    }

    #[test]
    fn grammar_number() {
        parse_ok!(number, "1");
        parse_ok!(number, "1.");
        parse_ok!(number, "-1,000.2");
        parse_ok!(number, "+12.50");
        parse_ok!(number, "12.50CAD", "12.50");
        parse_fail!(number, "CAD");
        parse_fail!(number, ",1");
    }

    #[test]
    fn grammar_commodity() {
        parse_ok!(commodity, "CAD");
        parse_ok!(commodity, "VBAL.TO");
        parse_ok!(commodity, "CAD}", "CAD");
        parse_ok!(commodity, "CAD @", "CAD");
        parse_fail!(commodity, "\"CAD\"");
    }

    #[test]
    fn grammar_account() {
        parse_ok!(account, "Assets:Checking");
        parse_ok!(account, "Expenses:Tax:2018");
        parse_ok!(account, "Assets:Cash 10 CAD", "Assets:Cash");
        parse_fail!(account, "Assets");
        parse_fail!(account, "Assets: Foo");
    }

    #[test]
    fn grammar_quoted_and_tag() {
        parse_ok!(quoted, r#""""#);
        parse_ok!(quoted, r#""Paris, France""#);
        parse_ok!(quoted, r#"" foo ""#);
        parse_ok!(tag, "#trip-2020");
        parse_ok!(tag, "#trip #work", "#trip");
        parse_fail!(tag, "#");
    }

    #[test]
    fn grammar_tokens_are_separated() {
        parse_ok!(amount, "10 CAD");
        parse_ok!(amount, "10\tCAD");
        parse_fail!(amount, "10CAD");
        parse_ok!(account_directive, "2020-01-01 open Assets:Cash ; opened");
        parse_fail!(account_directive, "2020-01-01 openAssets:Cash");
        parse_fail!(account_directive, "2020-01-01open Assets:Cash");
        parse_fail!(price_directive, "2020-01-01 priceUSD 1.33 CAD");
        parse_fail!(commodity_directive, "2020-01-01 commodityCAD");
        parse_fail!(transaction_header, r#"2020-01-01*"x""#);
        parse_fail!(transaction_header, r#"2020-01-01 *"x""#);
        parse_ok!(posting, "  Assets:Cash 10 CAD");
        parse_fail!(posting, "  Assets:Cash 10CAD");
        parse_fail!(posting, "  Assets:Cash 10 CAD @@10 USD");
    }

    #[test]
    fn glued_tokens_are_not_directives() {
        let state = state();
        assert!(account_directive("2020-01-01 openAssets:Cash", tc::MetaData::new(), &state)
            .unwrap()
            .is_none());
        assert!(price_directive("2020-01-01 priceUSD 1.33 CAD", tc::MetaData::new(), &state)
            .unwrap()
            .is_none());
        assert!(transaction_header(r#"2020-01-01*"x""#, tc::MetaData::new(), &state)
            .unwrap()
            .is_none());
        assert!(posting("  Assets:Cash 10CAD", tc::MetaData::new(), &state)
            .unwrap()
            .is_none());
    }

    #[test]
    fn open_account() {
        let account = account_directive(
            r#"2020-01-01 open Assets:Checking CAD "STRICT""#,
            meta("bank", "RBC"),
            &state(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(account.name.full_name(), "Assets:Checking");
        assert_eq!(account.opening, Some(date_of("2020-01-01")));
        assert_eq!(account.closing, None);
        assert_eq!(account.commodity.as_deref(), Some("CAD"));
        assert_eq!(account.booking_method, Some(tc::BookingMethod::Strict));
        assert_eq!(account.meta, meta("bank", "RBC"));
    }

    #[test]
    fn open_account_with_unknown_booking() {
        let account = account_directive(
            r#"2020-01-01   open   Assets:Checking  "AVERAGE"   ; legacy"#,
            tc::MetaData::new(),
            &state(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(account.commodity, None);
        assert_eq!(account.booking_method, None);
    }

    #[test]
    fn close_account() {
        let account = account_directive("2020-12-31 close Assets:Checking", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(account.opening, None);
        assert_eq!(account.closing, Some(date_of("2020-12-31")));

        assert!(account_directive("2020-12-31 close Assets:Checking CAD", tc::MetaData::new(), &state())
            .unwrap()
            .is_none());
    }

    #[test]
    fn account_with_unknown_root() {
        let err = account_directive("2020-01-01 open Cash:Wallet", tc::MetaData::new(), &state())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: invalid account name: Cash:Wallet");
    }

    #[test]
    fn price() {
        let price = price_directive("2020-01-01 price USD 1.3345 CAD", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(price.commodity, "USD");
        assert_eq!(price.amount, tc::Amount::new(Decimal::new(13345, 4), "CAD", 4));
        assert!(price_directive("2020-01-01 price USD CAD", tc::MetaData::new(), &state())
            .unwrap()
            .is_none());
    }

    #[test]
    fn commodity() {
        let commodity = commodity_directive("1867-07-01 commodity CAD", meta("name", "Canadian Dollar"), &state())
            .unwrap()
            .unwrap();
        assert_eq!(commodity.symbol, "CAD");
        assert_eq!(commodity.opening, Some(date_of("1867-07-01")));
        assert_eq!(commodity.meta, meta("name", "Canadian Dollar"));
    }

    #[test]
    fn balance() {
        let balance = balance_directive(
            "2020-07-01 balance Assets:Checking -1,250.00 CAD ; from statement",
            tc::MetaData::new(),
            &state(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(balance.account.full_name(), "Assets:Checking");
        assert_eq!(balance.amount, tc::Amount::new(Decimal::new(-125000, 2), "CAD", 2));
    }

    #[test]
    fn option_and_plugin() {
        let option = option_directive(r#"option "operating_currency" "CAD""#).unwrap().unwrap();
        assert_eq!(option.name, "operating_currency");
        assert_eq!(option.value, "CAD");
        assert!(option_directive(r#"option "title""#).unwrap().is_none());

        assert_eq!(
            plugin_directive(r#"plugin "tally.plugins.check_commodity""#).unwrap(),
            Some("tally.plugins.check_commodity".to_string())
        );
        assert!(plugin_directive("plugin tally").unwrap().is_none());
    }

    #[test]
    fn event() {
        let event = event_directive(r#"2014-07-09 event "location" "Paris, France""#, tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(event.name, "location");
        assert_eq!(event.value, "Paris, France");
    }

    #[test]
    fn custom() {
        let custom = custom_directive(
            r#"2020-01-01 custom "budget" "Expenses:Food"  " monthly " 400.00 CAD "" ; note"#,
            tc::MetaData::new(),
            &state(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(custom.name, "budget");
        assert_eq!(custom.values, vec!["Expenses:Food", "monthly", "400.00 CAD"]);

        let custom = custom_directive(r#"2020-01-01 custom "marker""#, tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert!(custom.values.is_empty());
    }

    #[test]
    fn metadata_line() {
        assert_eq!(metadata(r#"  statement: "2020-01.pdf""#), Some(meta("statement", "2020-01.pdf")));
        assert_eq!(metadata(r#"    key:"value""#), Some(meta("key", "value")));
        assert_eq!(metadata(r#"key: "value""#), None);
        assert_eq!(metadata("  Assets:Checking 10.00 CAD"), None);
        assert_eq!(metadata("  key: value"), None);
    }

    #[test]
    fn header() {
        let header = transaction_header(
            r#"2020-06-13 * "Employer" "Paycheck" #work #2020"#,
            meta("id", "42"),
            &state(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(header.date, date_of("2020-06-13"));
        assert_eq!(header.flag, tc::Flag::Complete);
        assert_eq!(header.payee, "Employer");
        assert_eq!(header.narration, "Paycheck");
        assert_eq!(header.tags, vec![tc::Tag::from("work"), tc::Tag::from("2020")]);
        assert_eq!(header.meta, meta("id", "42"));

        let header = transaction_header(r#"2020-06-13 ! "Coffee""#, tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(header.flag, tc::Flag::Incomplete);
        assert_eq!(header.payee, "");
        assert_eq!(header.narration, "Coffee");

        assert!(transaction_header("2020-06-13 open Assets:Checking", tc::MetaData::new(), &state())
            .unwrap()
            .is_none());
    }

    #[test]
    fn simple_posting() {
        let parsed = posting("  Assets:Checking    10.00 CAD", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(parsed.account.full_name(), "Assets:Checking");
        assert_eq!(parsed.amount, tc::Amount::new(Decimal::new(1000, 2), "CAD", 2));
        assert_eq!(parsed.price, None);
        assert_eq!(parsed.cost, None);

        assert!(posting("Assets:Checking 10.00 CAD", tc::MetaData::new(), &state())
            .unwrap()
            .is_none());
        assert!(posting("  Assets:Checking", tc::MetaData::new(), &state())
            .unwrap()
            .is_none());
    }

    #[test]
    fn posting_with_unit_price() {
        let posting = posting("  Assets:Checking -400.00 USD @ 1.09 CAD", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(posting.price, Some(tc::Amount::new(Decimal::new(109, 2), "CAD", 2)));
        assert_eq!(posting.total_price, None);
    }

    #[test]
    fn posting_with_total_price() {
        let posting = posting("  Assets:Checking -400.00 USD @@ 436.00 CAD", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert_eq!(posting.price, Some(tc::Amount::new(Decimal::new(109, 2), "CAD", 2)));
        assert_eq!(
            posting.total_price,
            Some(tc::Amount::new(Decimal::new(43600, 2), "CAD", 2))
        );

        let err = posting_err("  Assets:Checking 0 USD @@ 436.00 CAD");
        assert!(err.to_string().contains("zero amount"));
    }

    fn posting_err(line: &str) -> ParseError {
        posting(line, tc::MetaData::new(), &state()).unwrap_err()
    }

    #[test]
    fn posting_with_cost() {
        let posting = posting(
            r#"  Assets:Brokerage 10 HOOL {"first-lot", 518.73 USD, 2014-02-11} @ 520.00 USD"#,
            meta("note", "buy"),
            &state(),
        )
        .unwrap()
        .unwrap();
        let cost = posting.cost.unwrap();
        assert_eq!(cost.amount, Some(tc::Amount::new(Decimal::new(51873, 2), "USD", 2)));
        assert_eq!(cost.date, Some(date_of("2014-02-11")));
        assert_eq!(cost.label.as_deref(), Some("first-lot"));
        assert_eq!(posting.price, Some(tc::Amount::new(Decimal::new(52000, 2), "USD", 2)));
        assert_eq!(posting.meta, meta("note", "buy"));
    }

    #[test]
    fn posting_with_price_before_cost() {
        let posting = posting("  Assets:Brokerage -5 HOOL @ 520.00 USD {}", tc::MetaData::new(), &state())
            .unwrap()
            .unwrap();
        assert!(posting.cost.unwrap().is_empty());
        assert!(posting.price.is_some());
    }

    #[test]
    fn malformed_costs() {
        let err = posting_err("  Assets:Brokerage 10 HOOL {518.73 USD, garbage}");
        assert_eq!(
            err.to_string(),
            "Invalid input: unexpected elements in cost {518.73 USD, garbage}"
        );
        assert!(posting_err("  Assets:Brokerage 10 HOOL {518.73 USD, 1.00 CAD}")
            .to_string()
            .contains("unexpected elements"));
        assert!(posting_err("  Assets:Brokerage 10 HOOL {-518.73 USD}")
            .to_string()
            .contains("must not be negative"));
    }
}
