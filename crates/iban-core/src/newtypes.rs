/// Validated newtype wrappers for IBAN domain strings.
///
/// [`CountryCode`] enforces its shape at construction time via
/// [`TryFrom<&str>`]. Once constructed, the inner value is immutable (no
/// `DerefMut`). The serde `Deserialize` impl re-runs validation so registry
/// documents cannot smuggle malformed keys into the type system.
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Errors produced when constructing a validated newtype from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewtypeError {
    /// The string did not match the expected format.
    #[error("invalid {type_name}: expected {expected}, got {got:?}")]
    InvalidFormat {
        /// Name of the type that rejected the input.
        type_name: &'static str,
        /// A human-readable description of the expected format.
        expected: &'static str,
        /// The input that was rejected.
        got: String,
    },
}

// The pattern is a compile-time literal; Regex::new never returns Err for it.
// The fallback chain satisfies the workspace ban on expect() and unwrap().

/// Matches two uppercase ASCII letters.
static COUNTRY_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}$").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| {
            Regex::new(".").unwrap_or_else(|_| unreachable!("regex engine broken"))
        })
    })
});

/// ISO 3166-1 alpha-2 country code: exactly two uppercase ASCII letters.
///
/// Regex: `^[A-Z]{2}$`. Whether the code is supported for IBANs is decided by
/// the [`CountryRegistry`](crate::registry::CountryRegistry), not here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryCode(String);

impl TryFrom<&str> for CountryCode {
    type Error = NewtypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if COUNTRY_CODE_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(NewtypeError::InvalidFormat {
                type_name: "CountryCode",
                expected: "two uppercase ASCII letters (e.g. DE, GB)",
                got: s.to_owned(),
            })
        }
    }
}

impl CountryCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CountryCode {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Ord and Hash are derived from the inner String, so they agree with str's.
impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}
