//! Parser for the SWIFT IBAN structure notation.
//!
//! The IBAN registry describes every BBAN as a sequence of segments such as
//! `8!n10!n` (German BBAN: 8 digits, then 10 digits). Each segment is a
//! length, an optional `!` marking the length as fixed, and a character class:
//!
//! | Class | Characters            |
//! |-------|-----------------------|
//! | `n`   | digits `0-9`          |
//! | `a`   | upper case `A-Z`      |
//! | `c`   | `a-z`, `A-Z`, `0-9`   |
//! | `e`   | blank space           |
//!
//! IBAN structures additionally start with the literal country code, e.g.
//! `DE2!n8!n10!n`. A parsed [`Structure`] is compiled into an anchored regular
//! expression once, when the registry is loaded.

use std::fmt;

/// Errors produced while parsing structure notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// The notation contained no segments.
    #[error("structure notation is empty")]
    Empty,
    /// A segment was missing its leading length.
    #[error("expected a segment length at offset {offset} in {notation:?}")]
    MissingLength {
        /// The full notation being parsed.
        notation: String,
        /// Byte offset of the offending character.
        offset: usize,
    },
    /// A segment length was zero or did not fit in a `usize`.
    #[error("invalid segment length at offset {offset} in {notation:?}")]
    InvalidLength {
        /// The full notation being parsed.
        notation: String,
        /// Byte offset where the length starts.
        offset: usize,
    },
    /// A segment ended with something other than `n`, `a`, `c` or `e`.
    #[error("unknown character class {class:?} at offset {offset} in {notation:?}")]
    UnknownClass {
        /// The full notation being parsed.
        notation: String,
        /// The unexpected character, if any (`None` at end of input).
        class: Option<char>,
        /// Byte offset of the offending character.
        offset: usize,
    },
}

/// The character class of a structure segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `n`: decimal digits.
    Numeric,
    /// `a`: upper case letters.
    Alphabetic,
    /// `c`: upper and lower case letters and digits.
    Alphanumeric,
    /// `e`: blank space.
    Space,
}

impl CharClass {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Numeric),
            'a' => Some(Self::Alphabetic),
            'c' => Some(Self::Alphanumeric),
            'e' => Some(Self::Space),
            _ => None,
        }
    }

    /// Returns the notation character for this class.
    pub fn symbol(self) -> char {
        match self {
            Self::Numeric => 'n',
            Self::Alphabetic => 'a',
            Self::Alphanumeric => 'c',
            Self::Space => 'e',
        }
    }

    /// Returns the regex fragment matching one character of this class.
    pub fn regex_fragment(self) -> &'static str {
        match self {
            Self::Numeric => r"\d",
            Self::Alphabetic => "[A-Z]",
            Self::Alphanumeric => "[a-zA-Z0-9]",
            Self::Space => " ",
        }
    }
}

/// One `<length>[!]<class>` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Number of characters (exact when `fixed`, otherwise a maximum).
    pub length: usize,
    /// `true` when the segment carried the `!` marker.
    pub fixed: bool,
    /// The allowed characters.
    pub class: CharClass,
}

impl Segment {
    fn regex_fragment(&self) -> String {
        let class = self.class.regex_fragment();
        if self.fixed {
            format!("{class}{{{}}}", self.length)
        } else {
            format!("{class}{{1,{}}}", self.length)
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.fixed { "!" } else { "" };
        write!(f, "{}{bang}{}", self.length, self.class.symbol())
    }
}

/// A parsed structure: an optional literal prefix followed by segments.
///
/// BBAN structures have an empty prefix; IBAN structures carry the country
/// code as prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Structure {
    prefix: String,
    segments: Vec<Segment>,
}

impl Structure {
    /// Parses structure notation such as `"4!a6!n8!n"` or `"GB2!n4!a6!n8!n"`.
    ///
    /// Leading upper case letters are taken as the literal prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError`] when the notation is empty or a segment is
    /// malformed.
    pub fn parse(notation: &str) -> Result<Self, StructureError> {
        let prefix_len = notation
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(notation.len());
        let prefix = notation[..prefix_len].to_owned();

        let mut segments = Vec::new();
        let mut chars = notation[prefix_len..].char_indices().peekable();

        while let Some(&(start, _)) = chars.peek() {
            let offset = prefix_len + start;

            let mut digits_end = start;
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                digits_end = i + c.len_utf8();
                chars.next();
            }
            if digits_end == start {
                return Err(StructureError::MissingLength {
                    notation: notation.to_owned(),
                    offset,
                });
            }
            let length = notation[prefix_len + start..prefix_len + digits_end]
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| StructureError::InvalidLength {
                    notation: notation.to_owned(),
                    offset,
                })?;

            let fixed = chars.next_if(|&(_, c)| c == '!').is_some();

            let (class_offset, class_char) = match chars.next() {
                Some((i, c)) => (prefix_len + i, Some(c)),
                None => (notation.len(), None),
            };
            let class = class_char.and_then(CharClass::from_char).ok_or_else(|| {
                StructureError::UnknownClass {
                    notation: notation.to_owned(),
                    class: class_char,
                    offset: class_offset,
                }
            })?;

            segments.push(Segment {
                length,
                fixed,
                class,
            });
        }

        if segments.is_empty() {
            return Err(StructureError::Empty);
        }

        Ok(Self { prefix, segments })
    }

    /// The literal prefix (the country code for IBAN structures).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Maximum number of characters described, including the prefix.
    ///
    /// For structures made only of fixed segments this is the exact length.
    pub fn max_len(&self) -> usize {
        self.prefix.len() + self.segments.iter().map(|s| s.length).sum::<usize>()
    }

    /// Returns `true` if every segment has a fixed length.
    pub fn is_fixed_length(&self) -> bool {
        self.segments.iter().all(|s| s.fixed)
    }

    /// Returns the anchored regular expression source for this structure.
    ///
    /// ```
    /// use iban_core::structure::Structure;
    ///
    /// let s = Structure::parse("DE2!n8!n10!n")?;
    /// assert_eq!(s.to_regex_source(), r"^DE\d{2}\d{8}\d{10}$");
    /// # Ok::<(), iban_core::structure::StructureError>(())
    /// ```
    pub fn to_regex_source(&self) -> String {
        let mut source = String::from("^");
        source.push_str(&regex::escape(&self.prefix));
        for segment in &self.segments {
            source.push_str(&segment.regex_fragment());
        }
        source.push('$');
        source
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parse_german_bban() {
        let s = Structure::parse("8!n10!n").expect("valid");
        assert_eq!(s.prefix(), "");
        assert_eq!(
            s.segments(),
            &[
                Segment {
                    length: 8,
                    fixed: true,
                    class: CharClass::Numeric
                },
                Segment {
                    length: 10,
                    fixed: true,
                    class: CharClass::Numeric
                },
            ]
        );
        assert_eq!(s.max_len(), 18);
        assert!(s.is_fixed_length());
    }

    #[test]
    fn parse_iban_structure_with_prefix() {
        let s = Structure::parse("GB2!n4!a6!n8!n").expect("valid");
        assert_eq!(s.prefix(), "GB");
        assert_eq!(s.segments().len(), 4);
        assert_eq!(s.max_len(), 22);
    }

    #[test]
    fn parse_all_classes() {
        let s = Structure::parse("1!n2!a3!c4!e").expect("valid");
        let classes: Vec<CharClass> = s.segments().iter().map(|seg| seg.class).collect();
        assert_eq!(
            classes,
            vec![
                CharClass::Numeric,
                CharClass::Alphabetic,
                CharClass::Alphanumeric,
                CharClass::Space
            ]
        );
    }

    #[test]
    fn parse_variable_length_segment() {
        let s = Structure::parse("4!a10n").expect("valid");
        assert!(!s.is_fixed_length());
        assert_eq!(s.to_regex_source(), r"^[A-Z]{4}\d{1,10}$");
    }

    #[test]
    fn regex_source_for_mixed_bban() {
        let s = Structure::parse("5!n5!n11!c2!n").expect("valid");
        assert_eq!(s.to_regex_source(), r"^\d{5}\d{5}[a-zA-Z0-9]{11}\d{2}$");
    }

    #[test]
    fn display_round_trips_notation() {
        for notation in ["DE2!n8!n10!n", "4!a6!n8!n", "3!n10c"] {
            let s = Structure::parse(notation).expect("valid");
            assert_eq!(s.to_string(), notation);
        }
    }

    #[test]
    fn reject_empty() {
        assert_eq!(Structure::parse(""), Err(StructureError::Empty));
        assert_eq!(Structure::parse("DE"), Err(StructureError::Empty));
    }

    #[test]
    fn reject_missing_length() {
        let err = Structure::parse("8!n!n").expect_err("missing length");
        assert_eq!(
            err,
            StructureError::MissingLength {
                notation: "8!n!n".to_owned(),
                offset: 3
            }
        );
    }

    #[test]
    fn reject_zero_length() {
        let err = Structure::parse("0!n").expect_err("zero length");
        assert!(matches!(err, StructureError::InvalidLength { offset: 0, .. }));
    }

    #[test]
    fn reject_unknown_class() {
        let err = Structure::parse("4!x").expect_err("unknown class");
        assert!(matches!(
            err,
            StructureError::UnknownClass {
                class: Some('x'),
                offset: 2,
                ..
            }
        ));
    }

    #[test]
    fn reject_truncated_segment() {
        let err = Structure::parse("4!n8!").expect_err("truncated");
        assert!(matches!(
            err,
            StructureError::UnknownClass {
                class: None,
                offset: 5,
                ..
            }
        ));
    }
}
