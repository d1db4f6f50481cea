//! The per-country IBAN registry.
//!
//! A [`CountryRegistry`] maps ISO 3166-1 alpha-2 codes to [`CountryInfo`]
//! records. It is built once from a JSON document and is read-only afterwards,
//! so a single instance can be shared across threads without locking.
//!
//! The library embeds a snapshot of the SWIFT IBAN registry, exposed through
//! [`builtin`]. Callers holding a newer or trimmed registry can load their own
//! with [`CountryRegistry::from_json`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::country::CountryInfo;
use crate::newtypes::{CountryCode, NewtypeError};
use crate::structure::StructureError;

/// The embedded registry document.
static BUILTIN_JSON: &str = include_str!("../data/iban_registry.json");

/// The built-in registry, loaded on first use.
///
/// The embedded document is covered by tests, so the empty fallback is only
/// reachable if the data file is edited into an invalid state.
static BUILTIN: LazyLock<CountryRegistry> = LazyLock::new(|| {
    CountryRegistry::from_json(BUILTIN_JSON).unwrap_or_else(|err| {
        tracing::error!(error = %err, "embedded IBAN registry failed to load");
        CountryRegistry::default()
    })
});

/// Returns the registry embedded in the library.
pub fn builtin() -> &'static CountryRegistry {
    &BUILTIN
}

/// A country lookup that requires registry data hit an unknown code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported country code {code:?}")]
pub struct UnsupportedCountryCodeError {
    /// The code that was looked up.
    pub code: String,
}

/// A registry document could not be loaded.
///
/// Load failures are fatal to initialization; they never surface as
/// validation violations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("registry document is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// A top-level key is not a two-letter upper case country code.
    #[error("registry key {key:?} is not a country code: {source}")]
    InvalidCountryCode {
        /// The offending key.
        key: String,
        /// Why the key was rejected.
        source: NewtypeError,
    },
    /// A structure string could not be parsed.
    #[error("country {code}: invalid {field}: {source}")]
    Structure {
        /// The country being loaded.
        code: String,
        /// `"iban_structure"` or `"bban_structure"`.
        field: &'static str,
        /// The parse failure.
        source: StructureError,
    },
    /// A compiled structure was rejected by the regex engine.
    #[error("country {code}: {field} does not compile to a regex: {source}")]
    Regex {
        /// The country being loaded.
        code: String,
        /// `"iban_structure"` or `"bban_structure"`.
        field: &'static str,
        /// The regex engine's error.
        source: regex::Error,
    },
    /// A structure's literal prefix is not what the country requires.
    #[error("country {code}: unexpected structure prefix {prefix:?}")]
    PrefixMismatch {
        /// The country being loaded.
        code: String,
        /// The prefix found in the structure.
        prefix: String,
    },
    /// `iban_length` is not country code + check digits + `bban_length`.
    #[error("country {code}: iban_length {iban_length} does not equal 4 + bban_length {bban_length}")]
    InconsistentLengths {
        /// The country being loaded.
        code: String,
        /// The declared IBAN length.
        iban_length: usize,
        /// The declared BBAN length.
        bban_length: usize,
    },
    /// A declared length disagrees with the length its structure describes.
    #[error("country {code}: {field} is {declared} but its structure describes {described}")]
    LengthMismatch {
        /// The country being loaded.
        code: String,
        /// `"iban_length"` or `"bban_length"`.
        field: &'static str,
        /// The length stated in the document.
        declared: usize,
        /// The length described by the structure notation.
        described: usize,
    },
}

/// One country as it appears in a registry document.
///
/// Regular expressions are not part of the document; they are derived from the
/// structure strings when the entry is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Display name of the country.
    pub country_name: String,
    /// SWIFT structure of the full IBAN, prefixed by the country code.
    pub iban_structure: String,
    /// SWIFT structure of the BBAN.
    pub bban_structure: String,
    /// Exact IBAN length.
    pub iban_length: usize,
    /// Exact BBAN length.
    pub bban_length: usize,
    /// Sample IBAN in electronic format.
    pub iban_electronic_format_example: String,
    /// Sample IBAN in print format.
    pub iban_print_format_example: String,
}

/// Immutable mapping from country code to [`CountryInfo`].
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    countries: BTreeMap<CountryCode, CountryInfo>,
}

impl CountryRegistry {
    /// Loads a registry from a JSON object keyed by country code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the document is malformed or any entry is
    /// internally inconsistent.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: BTreeMap<String, RegistryEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Builds a registry from already-parsed entries.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a key is not a country code or an entry is
    /// internally inconsistent.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (String, RegistryEntry)>,
    {
        let mut countries = BTreeMap::new();
        for (key, entry) in entries {
            let code = CountryCode::try_from(key.as_str())
                .map_err(|source| RegistryError::InvalidCountryCode { key, source })?;
            let info = CountryInfo::from_entry(code.clone(), entry)?;
            countries.insert(code, info);
        }
        tracing::debug!(countries = countries.len(), "loaded IBAN registry");
        Ok(Self { countries })
    }

    /// Returns the rules for `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedCountryCodeError`] if the code is not in the
    /// registry.
    pub fn lookup(&self, country_code: &str) -> Result<&CountryInfo, UnsupportedCountryCodeError> {
        self.get(country_code)
            .ok_or_else(|| UnsupportedCountryCodeError {
                code: country_code.to_owned(),
            })
    }

    /// Returns the rules for `country_code`, or `None` if it is unsupported.
    pub fn get(&self, country_code: &str) -> Option<&CountryInfo> {
        self.countries.get(country_code)
    }

    /// Returns `true` if the registry has rules for `country_code`.
    pub fn contains(&self, country_code: &str) -> bool {
        self.countries.contains_key(country_code)
    }

    /// Iterates over all countries in code order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryInfo> {
        self.countries.values()
    }

    /// Iterates over all supported codes in order.
    pub fn codes(&self) -> impl Iterator<Item = &CountryCode> {
        self.countries.keys()
    }

    /// Number of supported countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns `true` if the registry has no countries.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
