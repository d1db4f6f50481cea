//! Per-country IBAN rules.
//!
//! A [`CountryInfo`] is built once per country when a
//! [`CountryRegistry`](crate::registry::CountryRegistry) is loaded. Its
//! structure notation is parsed and compiled into regular expressions at that
//! point, so validation never recompiles a pattern.

use regex::Regex;

use crate::newtypes::CountryCode;
use crate::registry::{self, RegistryEntry, RegistryError, UnsupportedCountryCodeError};
use crate::structure::Structure;

/// The immutable IBAN rule set of one country.
#[derive(Debug, Clone)]
pub struct CountryInfo {
    country_code: CountryCode,
    country_name: String,
    iban_structure: Structure,
    bban_structure: Structure,
    iban_regex: Regex,
    bban_regex: Regex,
    iban_length: usize,
    bban_length: usize,
    iban_electronic_example: String,
    iban_print_example: String,
}

impl CountryInfo {
    /// Looks `country_code` up in the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedCountryCodeError`] if the registry has no entry
    /// for the code.
    ///
    /// ```
    /// use iban_core::CountryInfo;
    ///
    /// let de = CountryInfo::new("DE")?;
    /// assert_eq!(de.iban_length(), 22);
    /// assert!(CountryInfo::new("ZZ").is_err());
    /// # Ok::<(), iban_core::UnsupportedCountryCodeError>(())
    /// ```
    pub fn new(country_code: &str) -> Result<Self, UnsupportedCountryCodeError> {
        registry::builtin().lookup(country_code).cloned()
    }

    /// Builds and cross-checks a country from its registry entry.
    pub(crate) fn from_entry(
        country_code: CountryCode,
        entry: RegistryEntry,
    ) -> Result<Self, RegistryError> {
        let code = country_code.as_str();

        let iban_structure =
            Structure::parse(&entry.iban_structure).map_err(|source| RegistryError::Structure {
                code: code.to_owned(),
                field: "iban_structure",
                source,
            })?;
        let bban_structure =
            Structure::parse(&entry.bban_structure).map_err(|source| RegistryError::Structure {
                code: code.to_owned(),
                field: "bban_structure",
                source,
            })?;

        if iban_structure.prefix() != code {
            return Err(RegistryError::PrefixMismatch {
                code: code.to_owned(),
                prefix: iban_structure.prefix().to_owned(),
            });
        }
        if !bban_structure.prefix().is_empty() {
            return Err(RegistryError::PrefixMismatch {
                code: code.to_owned(),
                prefix: bban_structure.prefix().to_owned(),
            });
        }
        if entry.iban_length != code.len() + 2 + entry.bban_length {
            return Err(RegistryError::InconsistentLengths {
                code: code.to_owned(),
                iban_length: entry.iban_length,
                bban_length: entry.bban_length,
            });
        }
        check_described_length(code, "iban_length", entry.iban_length, &iban_structure)?;
        check_described_length(code, "bban_length", entry.bban_length, &bban_structure)?;

        let iban_regex = compile(code, "iban_structure", &iban_structure)?;
        let bban_regex = compile(code, "bban_structure", &bban_structure)?;

        Ok(Self {
            country_code,
            country_name: entry.country_name,
            iban_structure,
            bban_structure,
            iban_regex,
            bban_regex,
            iban_length: entry.iban_length,
            bban_length: entry.bban_length,
            iban_electronic_example: entry.iban_electronic_format_example,
            iban_print_example: entry.iban_print_format_example,
        })
    }

    /// The ISO 3166-1 alpha-2 code.
    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// The display name of the country.
    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    /// The SWIFT structure of the whole IBAN, e.g. `DE2!n8!n10!n`.
    pub fn iban_structure(&self) -> &Structure {
        &self.iban_structure
    }

    /// The SWIFT structure of the BBAN, e.g. `8!n10!n`.
    pub fn bban_structure(&self) -> &Structure {
        &self.bban_structure
    }

    /// Anchored regex compiled from [`iban_structure`](Self::iban_structure).
    pub fn iban_regex(&self) -> &Regex {
        &self.iban_regex
    }

    /// Anchored regex compiled from [`bban_structure`](Self::bban_structure).
    pub fn bban_regex(&self) -> &Regex {
        &self.bban_regex
    }

    /// Exact length of a valid IBAN for this country.
    pub fn iban_length(&self) -> usize {
        self.iban_length
    }

    /// Exact length of the BBAN portion.
    pub fn bban_length(&self) -> usize {
        self.bban_length
    }

    /// A sample IBAN in electronic format.
    pub fn iban_electronic_example(&self) -> &str {
        &self.iban_electronic_example
    }

    /// A sample IBAN in print format.
    pub fn iban_print_example(&self) -> &str {
        &self.iban_print_example
    }

    /// Returns `true` if `bban` matches this country's BBAN structure.
    pub fn matches_bban(&self, bban: &str) -> bool {
        self.bban_regex.is_match(bban)
    }
}

fn check_described_length(
    code: &str,
    field: &'static str,
    declared: usize,
    structure: &Structure,
) -> Result<(), RegistryError> {
    let described = structure.max_len();
    let consistent = if structure.is_fixed_length() {
        described == declared
    } else {
        described >= declared
    };
    if consistent {
        Ok(())
    } else {
        Err(RegistryError::LengthMismatch {
            code: code.to_owned(),
            field,
            declared,
            described,
        })
    }
}

fn compile(code: &str, field: &'static str, structure: &Structure) -> Result<Regex, RegistryError> {
    Regex::new(&structure.to_regex_source()).map_err(|source| RegistryError::Regex {
        code: code.to_owned(),
        field,
        source,
    })
}
