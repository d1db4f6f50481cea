//! The parsed IBAN record.
//!
//! [`Iban::new`] only decomposes its input; it never validates and never
//! fails. Validation is the job of [`crate::validation`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a print-format group.
const PRINT_GROUP: usize = 4;

/// Number of trailing characters left visible by [`Format::Anonymized`].
const VISIBLE_TAIL: usize = 4;

/// Output formats supported by [`Iban::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// No whitespace: `DE89370400440532013000`.
    Electronic,
    /// Groups of four separated by spaces: `DE89 3704 0044 0532 0130 00`.
    Print,
    /// Everything but the last four characters masked: `XXXXXXXXXXXXXXXXXX3000`.
    Anonymized,
}

/// A candidate IBAN split into its parts.
///
/// `electronic` is the input with all whitespace removed. The country code is
/// its first two characters, the check digits the next two and the BBAN the
/// rest; inputs shorter than four characters produce truncated parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iban {
    raw: String,
    electronic: String,
    country_code_end: usize,
    checksum_end: usize,
}

impl Iban {
    /// Decomposes `raw` into country code, check digits and BBAN.
    ///
    /// ```
    /// use iban_core::Iban;
    ///
    /// let iban = Iban::new("DE45 5005 0201 1241 5398 70");
    /// assert_eq!(iban.country_code(), "DE");
    /// assert_eq!(iban.checksum(), "45");
    /// assert_eq!(iban.bban(), "500502011241539870");
    /// ```
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let electronic: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let country_code_end = char_boundary_after(&electronic, 0, 2);
        let checksum_end = char_boundary_after(&electronic, country_code_end, 2);
        Self {
            raw,
            electronic,
            country_code_end,
            checksum_end,
        }
    }

    /// The input exactly as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The input with all whitespace removed.
    pub fn electronic(&self) -> &str {
        &self.electronic
    }

    /// The first two characters (fewer if the input is shorter).
    pub fn country_code(&self) -> &str {
        &self.electronic[..self.country_code_end]
    }

    /// The two characters after the country code (fewer if the input is shorter).
    pub fn checksum(&self) -> &str {
        &self.electronic[self.country_code_end..self.checksum_end]
    }

    /// Everything after the check digits; empty for short inputs.
    pub fn bban(&self) -> &str {
        &self.electronic[self.checksum_end..]
    }

    /// Number of characters in the electronic form.
    pub fn len(&self) -> usize {
        self.electronic.chars().count()
    }

    /// Returns `true` if the input contained nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.electronic.is_empty()
    }

    /// Renders the IBAN in the requested format.
    ///
    /// Formatting works on whatever was decomposed and never validates.
    ///
    /// ```
    /// use iban_core::{Format, Iban};
    ///
    /// let iban = Iban::new("DE45500502011241539870");
    /// assert_eq!(iban.format(Format::Electronic), "DE45500502011241539870");
    /// assert_eq!(iban.format(Format::Print), "DE45 5005 0201 1241 5398 70");
    /// assert_eq!(iban.format(Format::Anonymized), "XXXXXXXXXXXXXXXXXX9870");
    /// ```
    pub fn format(&self, format: Format) -> String {
        match format {
            Format::Electronic => self.electronic.clone(),
            Format::Print => self.print_format(),
            Format::Anonymized => self.anonymized_format(),
        }
    }

    fn print_format(&self) -> String {
        let mut out = String::with_capacity(self.electronic.len() + self.electronic.len() / 4);
        for (i, c) in self.electronic.chars().enumerate() {
            if i > 0 && i % PRINT_GROUP == 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }

    fn anonymized_format(&self) -> String {
        let masked = self.len().saturating_sub(VISIBLE_TAIL);
        self.electronic
            .chars()
            .enumerate()
            .map(|(i, c)| if i < masked { 'X' } else { c })
            .collect()
    }
}

/// Returns the byte offset `count` characters past `start`, clamped to the end.
fn char_boundary_after(s: &str, start: usize, count: usize) -> usize {
    s[start..]
        .char_indices()
        .nth(count)
        .map_or(s.len(), |(offset, _)| start + offset)
}

impl FromStr for Iban {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Iban {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Iban {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.electronic)
    }
}

impl Serialize for Iban {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.electronic)
    }
}

impl<'de> Deserialize<'de> for Iban {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Self::new(s))
    }
}
