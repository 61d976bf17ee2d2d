use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shamir_math::{error::FieldError, FieldElement, PrimeField};
use tracing::debug;

use crate::error::{ParseError, Result};

/// A point `(x, y)` on the dealer's polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl Share {
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }

    /// Parse a share line of the exact form `(x,y)`.
    ///
    /// `line_number` is 1-based and only used for the error message.
    /// Coordinates are unsigned decimal integers with no surrounding
    /// whitespace; a coordinate outside the field is a
    /// [`FieldError::OutOfRange`], anything else malformed is a
    /// [`ParseError::Share`].
    pub fn parse(
        field: &PrimeField,
        line: &str,
        line_number: usize,
    ) -> Result<Self> {
        let malformed = || ParseError::Share {
            line_number,
            line: line.to_owned(),
        };

        let (x, y) = line
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|inner| inner.split_once(','))
            .ok_or_else(malformed)?;

        let coordinate = |text: &str| -> Result<FieldElement> {
            if !is_decimal(text) {
                return Err(malformed().into());
            }
            match field.parse_element(text) {
                Ok(value) => Ok(value),
                // digits only, so this is a u64 overflow
                Err(FieldError::Parse(_)) => Err(malformed().into()),
                Err(err) => Err(err.into()),
            }
        };

        Ok(Self::new(coordinate(x)?, coordinate(y)?))
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The contents of a share file: the field modulus followed by one share
/// per line.
///
/// ```text
/// 7
/// (1,5)
/// (2,0)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareFile {
    pub field: PrimeField,
    pub shares: Vec<Share>,
}

impl ShareFile {
    pub fn new(field: PrimeField, shares: Vec<Share>) -> Self {
        Self { field, shares }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading share file");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a share file line by line.
    ///
    /// Empty lines at the very end are ignored so that a trailing newline is
    /// not mistaken for a share. An empty line anywhere else is malformed.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let (modulus_line, share_lines) =
            lines.split_first().ok_or(ParseError::Empty)?;
        let field = parse_modulus(modulus_line)?;

        let shares = share_lines
            .iter()
            .enumerate()
            .map(|(offset, line)| Share::parse(&field, line, offset + 2))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            modulus = field.modulus(),
            shares = shares.len(),
            "parsed share file"
        );
        Ok(Self { field, shares })
    }
}

impl FromStr for ShareFile {
    type Err = crate::error::ShamirError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

/// Renders the file format accepted by [`ShareFile::from_reader`].
impl fmt::Display for ShareFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.field.modulus())?;
        for share in &self.shares {
            writeln!(f, "{share}")?;
        }
        Ok(())
    }
}

fn parse_modulus(line: &str) -> Result<PrimeField> {
    let modulus = Some(line)
        .filter(|line| is_decimal(line))
        .and_then(|line| line.parse::<u64>().ok())
        .ok_or_else(|| ParseError::Modulus {
            line: line.to_owned(),
        })?;
    Ok(PrimeField::new(modulus)?)
}

fn is_decimal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
