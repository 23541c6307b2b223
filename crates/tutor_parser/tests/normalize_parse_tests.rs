//! Normalizer + parser contract: whatever students write in conventional
//! shorthand must reach the grammar as an explicit-operator expression.

use proptest::prelude::*;
use tutor_parser::{normalize, parse};

#[test]
fn shorthand_parses_after_normalization() {
    for raw in [
        "2x + 3",
        "3(x+1)",
        "(x+1)(x-1)",
        "$4x − 2$",
        "6 × x ÷ 2",
        "2sqrt(x)",
        "x^2 - 4",
    ] {
        let normalized = normalize(raw);
        assert!(
            parse(&normalized).is_ok(),
            "'{}' normalized to '{}' did not parse",
            raw,
            normalized
        );
    }
}

#[test]
fn shorthand_without_normalization_is_rejected() {
    assert!(parse("2x").is_err());
    assert!(parse("3(x+1)").is_err());
}

#[test]
fn display_output_reparses() {
    for raw in ["-2^2", "2^3^2", "(x+1)/(x-1)", "x - (2 - x)", "sin(x)^2 + cos(x)^2"] {
        let first = parse(&normalize(raw)).unwrap();
        let second = parse(&first.to_string()).unwrap();
        assert_eq!(first, second, "display of '{}' changed its meaning", raw);
    }
}

fn shorthand_strategy() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[0-9]{1,3}",
        Just("x".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(" ".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("^".to_string()),
        Just("×".to_string()),
        Just("−".to_string()),
        Just("$".to_string()),
        Just("sin".to_string()),
    ];
    prop::collection::vec(token, 0..16).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalize_is_idempotent(raw in shorthand_strategy()) {
        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_has_no_whitespace_or_dollars(raw in shorthand_strategy()) {
        let out = normalize(&raw);
        prop_assert!(!out.contains('$'));
        prop_assert!(!out.chars().any(char::is_whitespace));
    }

    #[test]
    fn parse_never_panics(raw in shorthand_strategy()) {
        let _ = parse(&normalize(&raw));
    }
}
