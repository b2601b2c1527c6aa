use std::net::IpAddr;

use bytes::{Bytes, BytesMut};
use chrono::{TimeZone, Utc};
use tuplex_codec::{DataType, Decimal, TupleError, TupleType, TupleValue, Value};
use uuid::Uuid;

/// A stand-in for a column store: keeps the encoded bytes of the last
/// bound parameter and hands them back against the column's declared type.
struct Column {
    declared: TupleType,
    stored: Option<Bytes>,
}

impl Column {
    fn new(declared: TupleType) -> Self {
        Self {
            declared,
            stored: None,
        }
    }

    fn write(&mut self, value: &TupleValue) {
        let mut buf = BytesMut::new();
        value.encode_into(&mut buf);
        self.stored = Some(buf.freeze());
    }

    fn read(&self) -> TupleValue {
        let stored = self.stored.clone().expect("Column should have been written");
        tuplex_codec::decode_bytes(stored, &self.declared).expect("Stored tuple should decode")
    }
}

fn sample_value(data_type: DataType) -> Value {
    match data_type {
        DataType::Ascii => Value::from("ascii"),
        DataType::Bigint => Value::Bigint(i64::MAX),
        DataType::Blob => Value::from(Bytes::from_static(b"blob")),
        DataType::Boolean => Value::Boolean(true),
        DataType::Counter => Value::Bigint(1),
        DataType::Decimal => Value::Decimal(Decimal::new(1234567890123, 4)),
        DataType::Double => Value::Double(1.1),
        DataType::Float => Value::Float(1.5),
        DataType::Inet => Value::Inet("123.123.123.123".parse::<IpAddr>().unwrap()),
        DataType::Int => Value::Int(i32::MAX),
        DataType::Text => Value::from("text"),
        DataType::Timestamp => Value::Timestamp(Utc.with_ymd_and_hms(1992, 12, 14, 0, 0, 0).unwrap()),
        DataType::Uuid => Value::Uuid(Uuid::from_u128(0x067e6162_3b6f_4ae2_a171_2470b63dff00)),
        DataType::Varchar => Value::from("varchar"),
        DataType::Varint => Value::Varint(i128::from(i64::MAX) * 4),
        DataType::Timeuuid => Value::Uuid(Uuid::from_u128(0xfe2b4360_28c6_11e2_81c1_0800200c9a66)),
    }
}

#[test]
fn test_simple_value() {
    let t = TupleType::of(&[DataType::Int, DataType::Text, DataType::Float]).unwrap();
    let mut v = t.new_value();
    v.set(0, 1).unwrap();
    v.set(1, "a").unwrap();
    v.set(2, 1.0f32).unwrap();

    assert_eq!(v.tuple_type().component_types(), &[DataType::Int, DataType::Text, DataType::Float]);
    assert_eq!(v.get_as::<i32>(0).unwrap(), Some(1));
    assert_eq!(v.get_as::<String>(1).unwrap().as_deref(), Some("a"));
    assert_eq!(v.get_as::<f32>(2).unwrap(), Some(1.0));
    assert_eq!(v.format().unwrap(), "(1, 'a', 1.0)");
}

#[test]
fn test_simple_write_read() {
    let t = TupleType::of(&[DataType::Int, DataType::Text, DataType::Float]).unwrap();
    let mut column = Column::new(t.clone());

    for (k, s, f) in [(1, "a", 1.0f32), (2, "b", 2.0f32)] {
        let v = t
            .new_value_from([Some(Value::Int(k)), Some(Value::from(s)), Some(Value::Float(f))])
            .unwrap();
        column.write(&v);
        assert_eq!(column.read(), v);
    }
}

#[test]
fn test_short_tuples_against_wider_column() {
    let t = TupleType::of(&[DataType::Ascii, DataType::Int, DataType::Boolean]).unwrap();
    let mut column = Column::new(t.clone());

    let complete = t
        .new_value_from([Some(Value::from("foo")), Some(Value::Int(123)), Some(Value::Boolean(true))])
        .unwrap();
    column.write(&complete);
    assert_eq!(column.read(), complete);

    // Incomplete values cannot be built from the wide type.
    let partial = t.new_value_from([Some(Value::from("bar")), Some(Value::Int(456))]);
    assert!(matches!(partial, Err(TupleError::ArityMismatch { expected: 3, actual: 2 })));

    let t1 = TupleType::of(&[DataType::Ascii, DataType::Int]).unwrap();
    let partial = t1
        .new_value_from([Some(Value::from("bar")), Some(Value::Int(456))])
        .unwrap();
    let partial_result = t
        .new_value_from([Some(Value::from("bar")), Some(Value::Int(456)), None])
        .unwrap();
    column.write(&partial);
    assert_eq!(column.read(), partial_result);

    let subpartial = t.new_value_from([Some(Value::from("zoo"))]);
    assert!(matches!(subpartial, Err(TupleError::ArityMismatch { expected: 3, actual: 1 })));

    let t2 = TupleType::of(&[DataType::Ascii]).unwrap();
    let subpartial = t2.new_value_from([Some(Value::from("zoo"))]).unwrap();
    let subpartial_result = t
        .new_value_from([Some(Value::from("zoo")), None, None])
        .unwrap();
    column.write(&subpartial);
    assert_eq!(column.read(), subpartial_result);

    // The narrow literal keeps its own arity.
    assert_eq!(subpartial.to_string(), "('zoo')");
    assert_eq!(column.read().to_string(), "('zoo', NULL, NULL)");
}

#[test]
fn test_varying_lengths() {
    for length in [1, 2, 3, 384] {
        let t = TupleType::new(std::iter::repeat(DataType::Int).take(length)).unwrap();
        let values = (0..length as i32).map(|j| Some(Value::Int(j)));
        let created = t.new_value_from(values).unwrap();

        let mut column = Column::new(t.clone());
        column.write(&created);
        let read = column.read();

        assert_eq!(read, created);
        assert_eq!(read.get_as::<i32>(length - 1).unwrap(), Some(length as i32 - 1));
    }
}

#[test]
fn test_subtypes_with_trailing_nulls() {
    let primitives: Vec<DataType> = DataType::ALL
        .into_iter()
        .filter(|dt| dt.is_tuple_component())
        .collect();

    let declared = TupleType::new(primitives.clone()).unwrap();
    let mut column = Column::new(declared.clone());

    for i in 1..=primitives.len() {
        let written_types = &primitives[..i];
        let created = TupleType::new(written_types.iter().copied())
            .unwrap()
            .new_value_from(written_types.iter().map(|dt| Some(sample_value(*dt))))
            .unwrap();
        let complete = declared
            .new_value_from(
                primitives
                    .iter()
                    .enumerate()
                    .map(|(j, dt)| (j < i).then(|| sample_value(*dt))),
            )
            .unwrap();

        column.write(&created);
        let read = column.read();
        assert_eq!(read.to_string(), complete.to_string());
        assert_eq!(read, complete);
    }
}

#[test]
fn test_sample_literals() {
    let t = TupleType::of(&[
        DataType::Decimal,
        DataType::Inet,
        DataType::Timestamp,
        DataType::Uuid,
        DataType::Varint,
    ])
    .unwrap();
    let v = t
        .new_value_from([
            Some(sample_value(DataType::Decimal)),
            Some(sample_value(DataType::Inet)),
            Some(sample_value(DataType::Timestamp)),
            Some(sample_value(DataType::Uuid)),
            Some(sample_value(DataType::Varint)),
        ])
        .unwrap();
    assert_eq!(
        v.to_string(),
        "(123456789.0123, '123.123.123.123', '1992-12-14T00:00:00.000+0000', \
         067e6162-3b6f-4ae2-a171-2470b63dff00, 36893488147419103228)"
    );
}

#[test]
fn test_tuple_types_shared_between_threads() {
    let t = TupleType::of(&[DataType::Int, DataType::Text]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = t.clone();
            std::thread::spawn(move || {
                let v = t
                    .new_value_from([Some(Value::Int(i)), Some(Value::from(format!("t{i}")))])
                    .unwrap();
                tuplex_codec::decode(&v.encode(), &t).unwrap() == v
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("Thread should not panic"));
    }
}
