//! Writes a [`Ledger`] back out in the text format the parser reads.

use std::{io, io::Write};

use tally_core::*;
use thiserror::Error;


#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BasicRenderer {}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn render<W: Write>(w: &mut W, ledger: &Ledger) -> Result<(), BasicRendererError> {
    BasicRenderer::default().render(ledger, w)
}

#[derive(Error, Debug)]
pub enum BasicRendererError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
    #[error("commodity {0} has no opening date")]
    UndatedCommodity(String),
    #[error("account {0} has neither an opening nor a closing date")]
    UndatedAccount(String),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

impl<'a, W: Write> Renderer<&'a Ledger, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, ledger: &'a Ledger, w: &mut W) -> Result<(), Self::Error> {
        for option in ledger.options() {
            self.render(option, w)?;
        }
        for plugin in ledger.plugins() {
            writeln!(w, "plugin \"{}\"", plugin)?;
        }
        if !ledger.options().is_empty() || !ledger.plugins().is_empty() {
            writeln!(w)?;
        }
        for commodity in ledger.commodities() {
            self.render(commodity, w)?;
            writeln!(w)?;
        }
        for account in ledger.accounts() {
            self.render(account, w)?;
            writeln!(w)?;
        }
        for price in ledger.prices() {
            self.render(price, w)?;
            writeln!(w)?;
        }
        for balance in ledger.balances() {
            self.render(balance, w)?;
            writeln!(w)?;
        }
        for event in ledger.events() {
            self.render(event, w)?;
            writeln!(w)?;
        }
        for custom in ledger.custom() {
            self.render(custom, w)?;
            writeln!(w)?;
        }
        for transaction in ledger.transactions() {
            self.render(transaction, w)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

fn render_key_value<W: Write>(
    w: &mut W,
    indent: &str,
    meta: &MetaData,
) -> Result<(), BasicRendererError> {
    for (key, value) in meta {
        writeln!(w, "{}{}: \"{}\"", indent, key, value)?;
    }
    Ok(())
}

impl<'a, W: Write> Renderer<&'a BcOption, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, option: &'a BcOption, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "option \"{}\" \"{}\"", option.name, option.value)?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Commodity, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, commodity: &'a Commodity, w: &mut W) -> Result<(), Self::Error> {
        let date = commodity
            .opening
            .ok_or_else(|| BasicRendererError::UndatedCommodity(commodity.symbol.clone()))?;
        writeln!(w, "{} commodity {}", date, commodity.symbol)?;
        render_key_value(w, "  ", &commodity.meta)
    }
}

/// An account is written as its open line followed by its close line, if any.
impl<'a, W: Write> Renderer<&'a Account, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, account: &'a Account, w: &mut W) -> Result<(), Self::Error> {
        if account.opening.is_none() && account.closing.is_none() {
            return Err(BasicRendererError::UndatedAccount(account.name.to_string()));
        }
        if let Some(opening) = account.opening {
            write!(w, "{} open {}", opening, account.name)?;
            if let Some(commodity) = &account.commodity {
                write!(w, " {}", commodity)?;
            }
            if let Some(booking) = account.booking_method {
                write!(w, " \"{}\"", booking.as_str())?;
            }
            writeln!(w)?;
            render_key_value(w, "  ", &account.meta)?;
        }
        if let Some(closing) = account.closing {
            writeln!(w, "{} close {}", closing, account.name)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Amount, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, amount: &'a Amount, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{} {}", amount.number, amount.commodity)?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Price, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, price: &'a Price, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{} price {} ", price.date, price.commodity)?;
        self.render(&price.amount, w)?;
        writeln!(w)?;
        render_key_value(w, "  ", &price.meta)
    }
}

impl<'a, W: Write> Renderer<&'a Balance, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, balance: &'a Balance, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{} balance {} ", balance.date, balance.account)?;
        self.render(&balance.amount, w)?;
        writeln!(w)?;
        render_key_value(w, "  ", &balance.meta)
    }
}

impl<'a, W: Write> Renderer<&'a Event, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, event: &'a Event, w: &mut W) -> Result<(), Self::Error> {
        writeln!(w, "{} event \"{}\" \"{}\"", event.date, event.name, event.value)?;
        render_key_value(w, "  ", &event.meta)
    }
}

impl<'a, W: Write> Renderer<&'a Custom, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, custom: &'a Custom, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{} custom \"{}\"", custom.date, custom.name)?;
        for value in &custom.values {
            write!(w, " \"{}\"", value)?;
        }
        writeln!(w)?;
        render_key_value(w, "  ", &custom.meta)
    }
}

impl<'a, W: Write> Renderer<&'a Transaction, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, transaction: &'a Transaction, w: &mut W) -> Result<(), Self::Error> {
        let header = &transaction.metadata;
        write!(w, "{} {}", header.date, header.flag)?;
        if !header.payee.is_empty() {
            write!(w, " \"{}\"", header.payee)?;
        }
        write!(w, " \"{}\"", header.narration)?;
        for tag in &header.tags {
            write!(w, " {}", tag)?;
        }
        writeln!(w)?;
        render_key_value(w, "  ", &header.meta)?;
        for posting in &transaction.postings {
            self.render(posting, w)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a Posting, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, posting: &'a Posting, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "  {}  ", posting.account)?;
        self.render(&posting.amount, w)?;
        if let Some(cost) = &posting.cost {
            write!(w, " ")?;
            self.render(cost, w)?;
        }
        if let Some(total) = &posting.total_price {
            write!(w, " @@ ")?;
            self.render(total, w)?;
        } else if let Some(price) = &posting.price {
            write!(w, " @ ")?;
            self.render(price, w)?;
        }
        writeln!(w)?;
        render_key_value(w, "    ", &posting.meta)
    }
}

impl<'a, W: Write> Renderer<&'a Cost, W> for BasicRenderer {
    type Error = BasicRendererError;
    fn render(&self, cost: &'a Cost, w: &mut W) -> Result<(), Self::Error> {
        write!(w, "{{")?;
        let mut first = true;

        if let Some(amount) = &cost.amount {
            self.render(amount, w)?;
            first = false;
        }

        if let Some(date) = &cost.date {
            if !first {
                write!(w, ", ")?;
            }
            write!(w, "{}", date)?;
            first = false;
        }

        if let Some(label) = &cost.label {
            if !first {
                write!(w, ", ")?;
            }
            write!(w, "\"{}\"", label)?;
        }

        write!(w, "}}")?;
        Ok(())
    }
}
