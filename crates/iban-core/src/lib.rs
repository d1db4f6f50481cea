#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check_digits;
pub mod country;
pub mod iban;
pub mod newtypes;
pub mod registry;
pub mod structure;
pub mod validation;

pub use check_digits::{compute_check_digits, iban_checksum_valid, mod97_10, mod97_remainder};
pub use country::CountryInfo;
pub use iban::{Format, Iban};
pub use newtypes::{CountryCode, NewtypeError};
pub use registry::{CountryRegistry, RegistryEntry, RegistryError, UnsupportedCountryCodeError};
pub use structure::{CharClass, Segment, Structure, StructureError};
pub use validation::dynamic::{UnexpectedTypeError, iban_from_value, validate_value};
pub use validation::{
    Check, CheckContext, INVALID_CHECKSUM_MESSAGE, INVALID_FORMAT_MESSAGE, TOO_SHORT_MESSAGE,
    UNSUPPORTED_COUNTRY_MESSAGE, ValidationConfig, ValidationResult, ValidationRule, Validator,
    Violation, build_rules, validate,
};
