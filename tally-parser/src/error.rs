use std::error::Error;
use std::fmt;
use std::io;

use tally_core::LedgerError;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    /// An error was encountered while converting string to a numeric representation.
    DecimalError { message: String },
    /// Input is invalid in some way.
    InvalidInput { message: String },
    /// Parser has reached an invalid state (most likely a bug in the parser).
    InvalidParserState { message: String },
    /// The ledger file could not be read.
    Io { message: String },
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The 1-based line of the input the error was found on, if known.
    pub line: Option<usize>,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::DecimalError { message } => {
                write!(f, "{}", message)?;
            }
            ParseErrorKind::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)?;
            }
            ParseErrorKind::InvalidParserState { message } => {
                write!(f, "Parser has reached an invalid state (please report this as a bug): expected {}", message)?;
            }
            ParseErrorKind::Io { message } => {
                write!(f, "Could not read ledger: {}", message)?;
            }
        }
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    pub(crate) fn invalid_state<T: ToString>(msg: T) -> ParseError {
        ParseError {
            kind: ParseErrorKind::InvalidParserState {
                message: msg.to_string(),
            },
            line: None,
            source: None,
        }
    }

    pub(crate) fn invalid_input<T: ToString>(msg: T) -> ParseError {
        ParseError {
            kind: ParseErrorKind::InvalidInput {
                message: msg.to_string(),
            },
            line: None,
            source: None,
        }
    }

    pub(crate) fn caused_by<E>(mut self, source: E) -> ParseError
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Attaches the 1-based line number the error was found on.
    pub fn at_line(mut self, line: usize) -> ParseError {
        self.line = Some(line);
        self
    }
}

impl From<LedgerError> for ParseError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        let kind = match err {
            LedgerError::InvalidAmount(_) => ParseErrorKind::DecimalError { message },
            _ => ParseErrorKind::InvalidInput { message },
        };
        ParseError {
            kind,
            line: None,
            source: Some(Box::new(err)),
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError {
            kind: ParseErrorKind::Io {
                message: err.to_string(),
            },
            line: None,
            source: Some(Box::new(err)),
        }
    }
}
