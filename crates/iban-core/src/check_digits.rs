//! ISO 7064 MOD 97-10 check-digit arithmetic for IBANs.
//!
//! All functions are zero-allocation apart from [`compute_check_digits`]'s
//! returned string: they walk the bytes of the input and reduce modulo 97
//! incrementally, so inputs of any length are handled without big integers.
//!
//! # References
//!
//! - ISO 13616-1:2020, Annex B (check digit calculation)
//! - ISO/IEC 7064:2003, MOD 97-10

/// Returns the MOD 97 remainder of an alphanumeric string.
///
/// Each character is converted to its numeric value:
/// - Digits `0`–`9` map to 0–9.
/// - Letters `A`–`Z` (and `a`–`z`) map to 10–35.
///
/// The resulting numeral is reduced incrementally: for each character,
/// `remainder = (remainder * base + value) % 97`, where `base` is 10 for a
/// one-digit expansion and 100 for a two-digit letter expansion.
///
/// Bytes outside `[0-9A-Za-z]` are skipped.
pub fn mod97_remainder(s: &str) -> u32 {
    reduce(0, s.as_bytes())
}

/// Folds `bytes` into a running MOD 97 remainder.
fn reduce(mut remainder: u32, bytes: &[u8]) -> u32 {
    for byte in bytes {
        match byte {
            b'0'..=b'9' => {
                let digit = u32::from(byte - b'0');
                remainder = (remainder * 10 + digit) % 97;
            }
            b'A'..=b'Z' => {
                let value = u32::from(byte - b'A') + 10;
                remainder = (remainder * 100 + value) % 97;
            }
            b'a'..=b'z' => {
                let value = u32::from(byte - b'a') + 10;
                remainder = (remainder * 100 + value) % 97;
            }
            _ => {}
        }
    }
    remainder
}

/// Verifies the ISO 7064 MOD 97-10 check of an already rearranged numeral.
///
/// A string passes when its [`mod97_remainder`] equals 1.
///
/// # Examples
///
/// ```
/// use iban_core::check_digits::mod97_10;
///
/// // `DE89370400440532013000` with its first four characters moved to the end.
/// assert!(mod97_10("370400440532013000DE89"));
/// assert!(!mod97_10("370400440532013000DE90"));
/// ```
pub fn mod97_10(s: &str) -> bool {
    mod97_remainder(s) == 1
}

/// Verifies the checksum of an IBAN in electronic format.
///
/// The first four characters (country code and check digits) are moved to
/// the end before the MOD 97-10 reduction. Strings shorter than four bytes
/// or containing non-ASCII characters never pass.
///
/// # Examples
///
/// ```
/// use iban_core::check_digits::iban_checksum_valid;
///
/// assert!(iban_checksum_valid("DE89370400440532013000"));
/// assert!(!iban_checksum_valid("DE90370400440532013000"));
/// ```
pub fn iban_checksum_valid(electronic: &str) -> bool {
    if electronic.len() < 4 || !electronic.is_ascii() {
        return false;
    }
    let (head, tail) = electronic.as_bytes().split_at(4);
    reduce(reduce(0, tail), head) == 1
}

/// Computes the two check digits that make `country_code + digits + bban` a
/// checksum-valid IBAN.
///
/// The digits are `98 - ((bban + country_code + "00") mod 97)`, zero-padded.
///
/// # Examples
///
/// ```
/// use iban_core::check_digits::compute_check_digits;
///
/// assert_eq!(compute_check_digits("DE", "370400440532013000"), "89");
/// assert_eq!(compute_check_digits("GB", "NWBK60161331926819"), "29");
/// ```
pub fn compute_check_digits(country_code: &str, bban: &str) -> String {
    let rearranged = format!("{bban}{country_code}00");
    let check = 98 - mod97_remainder(&rearranged);
    format!("{check:02}")
}
