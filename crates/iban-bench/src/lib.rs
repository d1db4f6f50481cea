//! IBAN fixture generator and benchmark utilities for iban-core.
//!
//! This crate provides deterministic generation of realistic IBAN batches,
//! valid and corrupted, for benchmarking and property testing of `iban-core`.

pub mod generator;

pub use generator::{
    GeneratorConfig, SizeTier, corrupt_check_digits, gen_iban, generate_ibans,
};
