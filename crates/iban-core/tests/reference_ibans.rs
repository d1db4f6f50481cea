//! Integration tests against the published IBAN examples.
//!
//! Every country's example from the registry must validate cleanly, and the
//! reference list of malformed IBANs must be rejected with exactly the
//! expected violation.
#![allow(clippy::expect_used)]

use iban_core::{
    Check, CountryInfo, Format, INVALID_CHECKSUM_MESSAGE, INVALID_FORMAT_MESSAGE, Iban,
    TOO_SHORT_MESSAGE, UNSUPPORTED_COUNTRY_MESSAGE, Validator, registry,
};

const VALID: &[&str] = &[
    "AD1200012030200359100100",
    "AE070331234567890123456",
    "AL47212110090000000235698741",
    "AT611904300234573201",
    "AZ21NABZ00000000137010001944",
    "BA391290079401028494",
    "BE68539007547034",
    "BG80BNBG96611020345678",
    "BH67BMAG00001299123456",
    "BR1800360305000010009795493C1",
    "BY13NBRB3600900000002Z00AB00",
    "CH9300762011623852957",
    "CR05015202001026284066",
    "CY17002001280000001200527600",
    "CZ6508000000192000145399",
    "DE89370400440532013000",
    "DK5000400440116243",
    "DO28BAGR00000001212453611324",
    "EE382200221020145685",
    "ES9121000418450200051332",
    "FI2112345600000785",
    "FO6264600001631634",
    "FR1420041010050500013M02606",
    "GB29NWBK60161331926819",
    "GE29NB0000000101904917",
    "GI75NWBK000000007099453",
    "GL8964710001000206",
    "GR1601101250000000012300695",
    "GT82TRAJ01020000001210029690",
    "HR1210010051863000160",
    "HU42117730161111101800000000",
    "IE29AIBK93115212345678",
    "IL620108000000099999999",
    "IQ98NBIQ850123456789012",
    "IS140159260076545510730339",
    "IT60X0542811101000000123456",
    "JO94CBJO0010000000000131000302",
    "KW81CBKU0000000000001234560101",
    "KZ86125KZT5004100100",
    "LB62099900000001001901229114",
    "LC55HEMM000100010012001200023015",
    "LI21088100002324013AA",
    "LT121000011101001000",
    "LU280019400644750000",
    "LV80BANK0000435195001",
    "MC5811222000010123456789030",
    "MD24AG000225100013104168",
    "ME25505000012345678951",
    "MK07250120000058984",
    "MR1300020001010000123456753",
    "MT84MALT011000012345MTLCAST001S",
    "MU17BOMM0101101030300200000MUR",
    "NL91ABNA0417164300",
    "NO9386011117947",
    "PK36SCBL0000001123456702",
    "PL61109010140000071219812874",
    "PS92PALS000000000400123456702",
    "PT50000201231234567890154",
    "QA58DOHB00001234567890ABCDEFG",
    "RO49AAAA1B31007593840000",
    "RS35260005601001611379",
    "SA0380000000608010167519",
    "SC18SSCB11010000000000001497USD",
    "SE4550000000058398257466",
    "SI56263300012039086",
    "SK3112000000198742637541",
    "SM86U0322509800000000270100",
    "SV62CENR00000000000000700025",
    "TL380080012345678910157",
    "TN5910006035183598478831",
    "TR330006100519786457841326",
    "UA213223130000026007233566001",
    "VG96VPVG0000012345678901",
    "XK051212012345678906",
];

#[test]
fn reference_ibans_are_valid() {
    let mut validator = Validator::new();
    for raw in VALID {
        assert!(
            validator.validate(&Iban::new(*raw)),
            "{raw} should be valid, violations: {:?}",
            validator.violation_messages()
        );
    }
}

#[test]
fn reference_ibans_are_valid_in_print_format() {
    let mut validator = Validator::new();
    for raw in VALID {
        let printed = Iban::new(*raw).format(Format::Print);
        assert!(validator.validate(&Iban::new(printed.as_str())), "{printed}");
    }
}

#[test]
fn every_registry_example_is_valid() {
    let mut validator = Validator::new();
    for info in registry::builtin().iter() {
        for example in [info.iban_electronic_example(), info.iban_print_example()] {
            assert!(
                validator.validate(&Iban::new(example)),
                "{} example {example} rejected: {:?}",
                info.country_code(),
                validator.violation_messages()
            );
        }
    }
}

#[test]
fn every_reference_country_is_registered() {
    for raw in VALID {
        let code = &raw[..2];
        let info = CountryInfo::new(code).expect("reference country is supported");
        assert_eq!(info.iban_length(), raw.len(), "{code}");
    }
}

#[test]
fn reference_invalid_ibans_are_rejected() {
    let mut validator = Validator::new();
    for raw in [
        "AD1200012030200359100120",
        "AT611904300234573221",
        "BA39129007940028494",
        "BE685390047034",
        "AA611904300234573201",
        "ST68000200010192194210112",
    ] {
        assert!(!validator.validate(&Iban::new(raw)), "{raw} should be invalid");
    }
}

#[test]
fn length_is_too_short() {
    let mut validator = Validator::new();
    assert!(!validator.validate(&Iban::new("DE")));
    assert_eq!(validator.violation_messages(), vec![TOO_SHORT_MESSAGE]);
}

#[test]
fn locale_code_is_invalid() {
    let mut validator = Validator::new();
    assert!(!validator.validate(&Iban::new("ZZ89 3704 0044 0532 0130 00")));
    assert_eq!(validator.violation_messages(), vec![UNSUPPORTED_COUNTRY_MESSAGE]);
}

#[test]
fn format_is_invalid() {
    let mut validator = Validator::new();
    assert!(!validator.validate(&Iban::new("DE89 3704 0044 053 013 00")));
    assert_eq!(validator.violation_messages(), vec![INVALID_FORMAT_MESSAGE]);
}

#[test]
fn checksum_is_invalid() {
    let mut validator = Validator::new();
    assert!(!validator.validate(&Iban::new("DE90 3704 0044 0532 0130 00")));
    assert_eq!(validator.violation_messages(), vec![INVALID_CHECKSUM_MESSAGE]);
}

#[test]
fn unknown_country_with_broken_body_reports_only_locale() {
    let mut validator = Validator::new();
    assert!(!validator.validate(&Iban::new("ZZ89 3704 004 053")));
    let checks: Vec<Check> = validator.violations().iter().map(|v| v.check).collect();
    assert_eq!(checks, vec![Check::CountryCode]);
}

#[test]
fn unsupported_country_lookup_is_an_error() {
    let err = CountryInfo::new("ZZ").expect_err("ZZ is unsupported");
    assert_eq!(err.code, "ZZ");
}
