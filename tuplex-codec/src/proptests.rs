//! Property-based tests for the composite tuple codec.
//!
//! These tests verify the laws the wire format must uphold:
//!
//! 1. **Roundtrip**: `decode(encode(v), v.type) == v` for all well typed values
//! 2. **Padding**: a value of a narrower type decodes against a wider type
//!    sharing its prefix as the same components followed by nulls
//! 3. **Arity**: positional construction succeeds iff the value count equals the arity
//! 4. **Formatting**: literals always have exactly `arity` elements

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use crate::{DataType, Decimal, TupleError, TupleType, Value};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Every type which may appear as a tuple component.
fn arb_component_type() -> impl Strategy<Value = DataType> {
    prop::sample::select(
        DataType::ALL
            .into_iter()
            .filter(|dt| dt.is_tuple_component())
            .collect::<Vec<_>>(),
    )
}

/// Strategy for generating a value valid for the given component type.
fn arb_value(data_type: DataType) -> BoxedStrategy<Value> {
    match data_type {
        DataType::Ascii => "[ -~]{0,20}".prop_map(Value::Text).boxed(),
        DataType::Text | DataType::Varchar => ".{0,20}".prop_map(Value::Text).boxed(),
        DataType::Bigint | DataType::Counter => any::<i64>().prop_map(Value::Bigint).boxed(),
        DataType::Int => any::<i32>().prop_map(Value::Int).boxed(),
        DataType::Blob => prop::collection::vec(any::<u8>(), 0..50)
            .prop_map(Value::from)
            .boxed(),
        DataType::Boolean => any::<bool>().prop_map(Value::Boolean).boxed(),
        DataType::Decimal => (any::<i128>(), any::<i32>())
            .prop_map(|(unscaled, scale)| Value::Decimal(Decimal::new(unscaled, scale)))
            .boxed(),
        // NaN payloads compare byte-wise so they are fine here.
        DataType::Double => any::<f64>().prop_map(Value::Double).boxed(),
        DataType::Float => any::<f32>().prop_map(Value::Float).boxed(),
        DataType::Inet => any::<IpAddr>().prop_map(Value::Inet).boxed(),
        DataType::Timestamp => (-8_000_000_000_000i64..8_000_000_000_000i64)
            .prop_map(|ms| Value::Timestamp(DateTime::<Utc>::from_timestamp_millis(ms).unwrap()))
            .boxed(),
        DataType::Uuid => any::<u128>()
            .prop_map(|n| Value::Uuid(Uuid::from_u128(n)))
            .boxed(),
        DataType::Timeuuid => any::<u128>()
            .prop_map(|n| {
                // Force the version nibble to 1.
                let n = (n & !(0xF << 76)) | (0x1 << 76);
                Value::Uuid(Uuid::from_u128(n))
            })
            .boxed(),
        DataType::Varint => any::<i128>().prop_map(Value::Varint).boxed(),
    }
}

/// Strategy for generating a component value or null.
fn arb_slot(data_type: DataType) -> BoxedStrategy<Option<Value>> {
    prop_oneof![
        1 => Just(None),
        4 => arb_value(data_type).prop_map(Some),
    ]
    .boxed()
}

/// Strategy for generating component types with 1-8 components.
fn arb_components() -> impl Strategy<Value = Vec<DataType>> {
    prop::collection::vec(arb_component_type(), 1..8)
}

/// Strategy for generating component types along with a value for each.
fn arb_typed_values() -> impl Strategy<Value = (Vec<DataType>, Vec<Option<Value>>)> {
    arb_components().prop_flat_map(|types| {
        let values: Vec<_> = types.iter().map(|dt| arb_slot(*dt)).collect();
        (Just(types), values)
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_arity_matches_component_count(types in arb_components()) {
        let tuple_type = TupleType::new(types.clone()).unwrap();
        prop_assert_eq!(tuple_type.arity(), types.len());
    }

    #[test]
    fn prop_roundtrip((types, values) in arb_typed_values()) {
        let tuple_type = TupleType::new(types).unwrap();
        let value = tuple_type.new_value_from(values).unwrap();

        let encoded = value.encode();
        prop_assert_eq!(encoded.len(), crate::tuple::encoded_len(&value));

        let decoded = crate::decode(&encoded, &tuple_type).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_narrow_values_pad_with_nulls(
        (types, values) in arb_typed_values(),
        split in any::<prop::sample::Index>(),
    ) {
        let wide = TupleType::new(types.clone()).unwrap();
        let m = split.index(types.len()) + 1;
        let narrow = TupleType::new(types[..m].iter().copied()).unwrap();

        let literal = narrow.new_value_from(values[..m].iter().cloned()).unwrap();
        let read = wide.decode(&literal.encode()).unwrap();

        let expected = wide
            .new_value_from(
                values[..m]
                    .iter()
                    .cloned()
                    .chain(std::iter::repeat(None).take(types.len() - m)),
            )
            .unwrap();
        prop_assert_eq!(read, expected);
    }

    #[test]
    fn prop_construction_requires_exact_arity(
        (types, values) in arb_typed_values(),
        extra in 1usize..3,
        drop_count in 1usize..8,
    ) {
        let tuple_type = TupleType::new(types.clone()).unwrap();

        let longer = values.iter().cloned().chain(std::iter::repeat(None).take(extra));
        let is_arity_mismatch = matches!(
            tuple_type.new_value_from(longer),
            Err(TupleError::ArityMismatch { .. })
        );
        prop_assert!(is_arity_mismatch);

        let keep = values.len().saturating_sub(drop_count);
        if keep < values.len() {
            let is_arity_mismatch = matches!(
                tuple_type.new_value_from(values[..keep].iter().cloned()),
                Err(TupleError::ArityMismatch { .. })
            );
            prop_assert!(is_arity_mismatch);
        }
    }

    #[test]
    fn prop_null_is_always_accepted(types in arb_components(), index in any::<prop::sample::Index>()) {
        let tuple_type = TupleType::new(types.clone()).unwrap();
        let index = index.index(types.len());

        let mut value = tuple_type.new_value();
        prop_assert!(value.set_null(index).is_ok());
        prop_assert!(value.get(index).unwrap().is_none());
    }

    #[test]
    fn prop_format_has_arity_elements((types, values) in arb_typed_values()) {
        let tuple_type = TupleType::new(types.clone()).unwrap();
        let value = tuple_type.new_value_from(values).unwrap();
        let literal = value.format().unwrap();

        prop_assert!(literal.starts_with('(') && literal.ends_with(')'));
        // Quoted text may itself contain `, `.
        if types.iter().all(|dt| !dt.is_text_like()) {
            let elements = literal[1..literal.len() - 1].split(", ").count();
            prop_assert_eq!(elements, types.len());
        }
    }
}
