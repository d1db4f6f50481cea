//! IBAN batch generator.
//!
//! Produces IBANs for every country of the built-in registry, with BBANs
//! drawn from each country's structure and check digits computed by
//! MOD 97-10. A configurable share of the batch has one check digit altered.

use iban_core::{CharClass, CountryInfo, compute_check_digits, registry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIGITS: &[u8] = b"0123456789";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Configuration for the IBAN generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of IBANs to produce.
    pub count: usize,
    /// Fraction of IBANs with a corrupted check digit (0.0-1.0).
    pub invalid_ratio: f64,
    /// Emit print format (groups of four) instead of electronic format.
    pub print_format: bool,
}

/// Predefined batch sizes for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 100 IBANs
    Small,
    /// 10 000 IBANs
    Medium,
    /// 100 000 IBANs
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let count = match self {
            SizeTier::Small => 100,
            SizeTier::Medium => 10_000,
            SizeTier::Large => 100_000,
        };
        GeneratorConfig {
            seed,
            count,
            invalid_ratio: 0.1,
            print_format: false,
        }
    }
}

/// Generates a valid IBAN for `country` with a random BBAN.
///
/// Algorithm: draw one character per BBAN position from the segment's
/// character class, then compute the two check digits by reversing the
/// MOD 97-10 verification.
pub fn gen_iban(rng: &mut StdRng, country: &CountryInfo) -> String {
    let mut bban = String::with_capacity(country.bban_length());
    for segment in country.bban_structure().segments() {
        let alphabet = match segment.class {
            CharClass::Numeric => DIGITS,
            CharClass::Alphabetic => UPPER,
            CharClass::Alphanumeric => ALPHANUM,
            CharClass::Space => b" ".as_slice(),
        };
        for _ in 0..segment.length {
            let idx = rng.gen_range(0..alphabet.len());
            bban.push(char::from(alphabet[idx]));
        }
    }
    let code = country.country_code().as_str();
    let check = compute_check_digits(code, &bban);
    format!("{code}{check}{bban}")
}

/// Replaces one of the two check digits of `iban` with a different digit.
///
/// A single-digit change always breaks MOD 97-10, so the result fails only
/// the checksum check. Strings shorter than four bytes are returned as is.
pub fn corrupt_check_digits(rng: &mut StdRng, iban: &str) -> String {
    let mut bytes = iban.as_bytes().to_vec();
    if bytes.len() < 4 {
        return iban.to_owned();
    }
    let position = rng.gen_range(2..4);
    let shift = rng.gen_range(1..10u8);
    let digit = bytes[position].wrapping_sub(b'0') % 10;
    bytes[position] = b'0' + (digit + shift) % 10;
    String::from_utf8(bytes).unwrap_or_else(|_| iban.to_owned())
}

/// Groups an electronic IBAN into blocks of four.
fn to_print_format(iban: &str) -> String {
    iban_core::Iban::new(iban).format(iban_core::Format::Print)
}

/// Generates a deterministic batch of IBANs across all registry countries.
pub fn generate_ibans(config: &GeneratorConfig) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let countries: Vec<&CountryInfo> = registry::builtin().iter().collect();
    if countries.is_empty() {
        return Vec::new();
    }

    (0..config.count)
        .map(|_| {
            let country = countries[rng.gen_range(0..countries.len())];
            let mut iban = gen_iban(&mut rng, country);
            if rng.gen_bool(config.invalid_ratio.clamp(0.0, 1.0)) {
                iban = corrupt_check_digits(&mut rng, &iban);
            }
            if config.print_format {
                iban = to_print_format(&iban);
            }
            iban
        })
        .collect()
}
