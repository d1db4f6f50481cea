//! The four built-in checks.
//!
//! Each rule is a zero-sized struct implementing [`ValidationRule`]. They are
//! registered, in this order, by [`crate::validation::build_rules`]:
//!
//! 1. [`LengthRule`]: the input is long enough to hold a country code and check digits.
//! 2. [`CountryCodeRule`]: the country has registry data.
//! 3. [`FormatRule`]: the IBAN has the country's structure and exact length.
//! 4. [`ChecksumRule`]: ISO 7064 MOD 97-10.
use crate::check_digits::iban_checksum_valid;

use super::{Check, CheckContext, ValidationRule, Violation};

fn violation(ctx: &CheckContext<'_>, check: Check) -> Violation {
    Violation::new(check, ctx.config.message(check))
}

/// The electronic form must reach [`min_length`](super::ValidationConfig::min_length).
///
/// The exact per-country length is not checked here; the anchored structure
/// pattern applied by [`FormatRule`] already pins it.
pub struct LengthRule;

impl ValidationRule for LengthRule {
    fn id(&self) -> Check {
        Check::Length
    }

    fn prerequisites(&self) -> &'static [Check] {
        &[]
    }

    fn check(&self, ctx: &CheckContext<'_>, violations: &mut Vec<Violation>) {
        if ctx.iban.len() < ctx.config.min_length {
            violations.push(violation(ctx, Check::Length));
        }
    }
}

/// The country code must be present in the registry.
///
/// Runs on whatever was split off as country code, so a truncated code is
/// reported alongside the length violation.
pub struct CountryCodeRule;

impl ValidationRule for CountryCodeRule {
    fn id(&self) -> Check {
        Check::CountryCode
    }

    fn prerequisites(&self) -> &'static [Check] {
        &[]
    }

    fn check(&self, ctx: &CheckContext<'_>, violations: &mut Vec<Violation>) {
        if ctx.country.is_none() {
            violations.push(violation(ctx, Check::CountryCode));
        }
    }
}

/// The electronic form must match the country's IBAN structure.
///
/// The structure covers the country code, two numeric check digits and the
/// BBAN, so a mismatch also catches wrong lengths and non-numeric check digits.
pub struct FormatRule;

impl ValidationRule for FormatRule {
    fn id(&self) -> Check {
        Check::Format
    }

    fn prerequisites(&self) -> &'static [Check] {
        &[Check::Length, Check::CountryCode]
    }

    fn check(&self, ctx: &CheckContext<'_>, violations: &mut Vec<Violation>) {
        let Some(country) = ctx.country else {
            return;
        };
        if !country.iban_regex().is_match(ctx.iban.electronic()) {
            violations.push(violation(ctx, Check::Format));
        }
    }
}

/// The MOD 97-10 remainder of the rearranged IBAN must be 1.
///
/// Only structurally valid IBANs are checked: a remainder over a string of the
/// wrong shape carries no information beyond the format violation.
pub struct ChecksumRule;

impl ValidationRule for ChecksumRule {
    fn id(&self) -> Check {
        Check::Checksum
    }

    fn prerequisites(&self) -> &'static [Check] {
        &[Check::Format]
    }

    fn check(&self, ctx: &CheckContext<'_>, violations: &mut Vec<Violation>) {
        if !iban_checksum_valid(ctx.iban.electronic()) {
            violations.push(violation(ctx, Check::Checksum));
        }
    }
}
