//! Property-based tests for the standard validator hierarchy.

use super::TypeRegistry;
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_finite() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
}

fn arb_non_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z ]{0,12}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
        Just(json!({"a": 1})),
        Just(json!([1, 2])),
    ]
}

proptest! {
    #[test]
    fn real_accepts_every_number(n in arb_finite()) {
        let registry = TypeRegistry::standard();
        let value = json!(n);
        prop_assert_eq!(registry.validate("Real", value.clone()), Ok(value));
    }

    #[test]
    fn real_rejects_non_numbers(v in arb_non_number()) {
        let registry = TypeRegistry::standard();
        let err = registry.validate("Real", v).unwrap_err();
        prop_assert!(err.to_string().starts_with("Not a valid Real Number: "));
    }

    #[test]
    fn whole_iff_non_negative_integer(n in -1_000_000i64..1_000_000) {
        let registry = TypeRegistry::standard();
        let result = registry.validate("Whole", json!(n));
        prop_assert_eq!(result.is_ok(), n >= 0);
    }

    #[test]
    fn whole_rejects_fractions(n in arb_finite()) {
        let registry = TypeRegistry::standard();
        let result = registry.validate("Whole", json!(n));
        prop_assert_eq!(result.is_ok(), n.floor() == n && n >= 0.0);
    }

    #[test]
    fn natural_iff_positive_integer(n in -1_000_000i64..1_000_000) {
        let registry = TypeRegistry::standard();
        prop_assert_eq!(registry.validate("Natural", json!(n)).is_ok(), n > 0);
        prop_assert_eq!(registry.validate("NegNatural", json!(n)).is_ok(), n < 0);
        prop_assert_eq!(registry.validate("NegWhole", json!(n)).is_ok(), n <= 0);
    }

    #[test]
    fn any_is_identity(v in arb_non_number()) {
        let registry = TypeRegistry::standard();
        prop_assert_eq!(registry.validate("Any", v.clone()), Ok(v));
    }
}

#[test]
fn whole_boundaries() {
    let registry = TypeRegistry::standard();

    assert_eq!(registry.validate("Whole", json!(0)), Ok(json!(0)));

    let err = registry.validate("Whole", json!(-0.0001)).unwrap_err();
    assert!(err
        .to_string()
        .contains("Not a valid Whole Number: -0.0001"));
}
