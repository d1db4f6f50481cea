//! Violation types and check dispatch for the IBAN validator.
//!
//! This module defines [`Check`], [`Violation`], [`ValidationResult`] and
//! [`ValidationConfig`], the [`ValidationRule`] trait implemented by the four
//! built-in checks, the pure [`validate`] dispatch function and the stateful
//! [`Validator`] wrapper that remembers the violations of its last call.
//!
//! Violations are data: an IBAN with a bad length, unknown country, wrong
//! shape or wrong check digits is reported through the violation list, never
//! through an error.
pub mod dynamic;
pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::country::CountryInfo;
use crate::iban::{Format, Iban};
use crate::registry::{self, CountryRegistry};


/// Default wording for an IBAN shorter than [`ValidationConfig::min_length`].
pub const TOO_SHORT_MESSAGE: &str = "The length of the given Iban is too short!";
/// Default wording for an unsupported country code.
pub const UNSUPPORTED_COUNTRY_MESSAGE: &str = "The locale code of the given Iban is not valid!";
/// Default wording for a structure mismatch.
pub const INVALID_FORMAT_MESSAGE: &str = "The format of the given Iban is not valid!";
/// Default wording for a failed MOD 97-10 check.
pub const INVALID_CHECKSUM_MESSAGE: &str = "The checksum of the given Iban is not valid!";

/// Identifies one of the built-in checks.
///
/// Checks run in declaration order. [`Check::code`] returns the stable
/// machine-readable name used in logs and serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// The IBAN is long enough to contain a country code and check digits.
    Length,
    /// The country code is in the registry.
    CountryCode,
    /// The IBAN matches the country's structure.
    Format,
    /// The MOD 97-10 remainder is 1.
    Checksum,
}

impl Check {
    /// Returns the snake-case name of the check.
    pub fn code(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::CountryCode => "country_code",
            Self::Format => "format",
            Self::Checksum => "checksum",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The check that failed.
    pub check: Check,
    /// Human-readable description, taken from [`ValidationConfig`].
    pub message: String,
}

impl Violation {
    /// Constructs a new [`Violation`].
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The violations found by one validation pass, in check order.
///
/// There is no partial success: the IBAN is valid exactly when the list is
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Every violation produced during the pass.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Creates an empty [`ValidationResult`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`ValidationResult`] from a pre-built list of violations.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns `true` if no check failed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violation messages in check order.
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Returns `true` if `check` produced a violation.
    pub fn has(&self, check: Check) -> bool {
        self.violations.iter().any(|v| v.check == check)
    }

    /// Returns an iterator over all violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Tunable parameters of a validation pass.
///
/// The messages default to the English wording in the `*_MESSAGE` constants and
/// can be replaced to localize output. All fields are optional when the config
/// is deserialized.
///
/// # Default
///
/// ```
/// # use iban_core::ValidationConfig;
/// let cfg = ValidationConfig::default();
/// assert_eq!(cfg.min_length, 4);
/// assert_eq!(cfg.invalid_checksum_message, "The checksum of the given Iban is not valid!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Shortest electronic form that is worth splitting (country code plus
    /// check digits).
    pub min_length: usize,
    /// Message for [`Check::Length`].
    pub too_short_message: String,
    /// Message for [`Check::CountryCode`].
    pub unsupported_country_message: String,
    /// Message for [`Check::Format`].
    pub invalid_format_message: String,
    /// Message for [`Check::Checksum`].
    pub invalid_checksum_message: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: 4,
            too_short_message: TOO_SHORT_MESSAGE.to_owned(),
            unsupported_country_message: UNSUPPORTED_COUNTRY_MESSAGE.to_owned(),
            invalid_format_message: INVALID_FORMAT_MESSAGE.to_owned(),
            invalid_checksum_message: INVALID_CHECKSUM_MESSAGE.to_owned(),
        }
    }
}

impl ValidationConfig {
    /// Returns the configured message for `check`.
    pub fn message(&self, check: Check) -> &str {
        match check {
            Check::Length => &self.too_short_message,
            Check::CountryCode => &self.unsupported_country_message,
            Check::Format => &self.invalid_format_message,
            Check::Checksum => &self.invalid_checksum_message,
        }
    }
}

/// Everything a rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The record under validation.
    pub iban: &'a Iban,
    /// The registry entry for the record's country code, if there is one.
    pub country: Option<&'a CountryInfo>,
    /// The active configuration.
    pub config: &'a ValidationConfig,
}

/// A single, stateless check applied to an [`Iban`].
///
/// Rules push at most one [`Violation`] into `violations`; a rule that finds
/// nothing wrong pushes nothing. The dispatch loop in [`validate`] runs a rule
/// only when every check listed in [`prerequisites`][ValidationRule::prerequisites]
/// ran and passed, so a rule never has to report on inputs it cannot judge.
///
/// The trait is object-safe; [`build_rules`] returns
/// `Vec<Box<dyn ValidationRule>>`.
pub trait ValidationRule {
    /// The check this rule implements.
    fn id(&self) -> Check;

    /// Checks that must pass before this rule is meaningful.
    fn prerequisites(&self) -> &'static [Check];

    /// Inspect the context and push any finding into `violations`.
    fn check(&self, ctx: &CheckContext<'_>, violations: &mut Vec<Violation>);
}

/// Builds the ordered list of built-in rules.
pub fn build_rules() -> Vec<Box<dyn ValidationRule>> {
    use rules::{ChecksumRule, CountryCodeRule, FormatRule, LengthRule};

    vec![
        Box::new(LengthRule),
        Box::new(CountryCodeRule),
        Box::new(FormatRule),
        Box::new(ChecksumRule),
    ]
}

/// Runs every applicable check on `iban` and collects the violations.
///
/// Checks run in the fixed order length, country code, format, checksum.
/// The pass does not stop at the first failure: length and country code are
/// always checked, so `"ZZ"` reports both. Format needs both of them to pass,
/// and checksum needs format, since neither can judge an input of the wrong
/// shape.
///
/// ```
/// use iban_core::{Iban, ValidationConfig, registry, validate};
///
/// let result = validate(
///     &Iban::new("DE89 3704 0044 0532 0130 00"),
///     registry::builtin(),
///     &ValidationConfig::default(),
/// );
/// assert!(result.is_valid());
/// ```
pub fn validate(
    iban: &Iban,
    registry: &CountryRegistry,
    config: &ValidationConfig,
) -> ValidationResult {
    let ctx = CheckContext {
        iban,
        country: registry.get(iban.country_code()),
        config,
    };

    let mut violations: Vec<Violation> = Vec::new();
    let mut passed: Vec<Check> = Vec::new();

    for rule in &build_rules() {
        if let Some(missing) = rule
            .prerequisites()
            .iter()
            .find(|&&check| !passed.contains(&check))
        {
            tracing::trace!(check = %rule.id(), prerequisite = %missing, "check skipped");
            continue;
        }
        let before = violations.len();
        rule.check(&ctx, &mut violations);
        if violations.len() == before {
            passed.push(rule.id());
        }
    }

    tracing::debug!(
        iban = %iban.format(Format::Anonymized),
        violations = violations.len(),
        "validated IBAN"
    );
    ValidationResult::from_violations(violations)
}

/// Validator that keeps the violations of its most recent call.
///
/// Each call to [`validate`](Validator::validate) resets the list, so
/// repeated calls on the same record yield identical results.
///
/// ```
/// use iban_core::{Iban, Validator};
///
/// let mut validator = Validator::new();
/// assert!(!validator.validate(&Iban::new("DE90 3704 0044 0532 0130 00")));
/// assert_eq!(
///     validator.violation_messages(),
///     vec!["The checksum of the given Iban is not valid!"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r CountryRegistry,
    config: ValidationConfig,
    last: ValidationResult,
}

impl Validator<'static> {
    /// Creates a validator over the built-in registry with default config.
    pub fn new() -> Self {
        Self::with_registry(registry::builtin())
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Validator<'r> {
    /// Creates a validator over a caller-supplied registry.
    pub fn with_registry(registry: &'r CountryRegistry) -> Self {
        Self {
            registry,
            config: ValidationConfig::default(),
            last: ValidationResult::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// The registry consulted by this validator.
    pub fn registry(&self) -> &'r CountryRegistry {
        self.registry
    }

    /// Validates `iban`, replacing the stored violations.
    ///
    /// Returns `true` iff no check failed.
    pub fn validate(&mut self, iban: &Iban) -> bool {
        self.last = validate(iban, self.registry, &self.config);
        self.last.is_valid()
    }

    /// Violations of the most recent call, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.last.violations
    }

    /// Messages of the most recent call, in check order.
    pub fn violation_messages(&self) -> Vec<&str> {
        self.last.messages()
    }

    /// The full result of the most recent call.
    pub fn last_result(&self) -> &ValidationResult {
        &self.last
    }
}
