//! Composite tuple values for column-oriented stores.
//!
//! A [TupleType] is an immutable, ordered schema of scalar [DataType]s and a
//! [TupleValue] binds concrete, type checked data to one. Values move to and
//! from the wire as a sequence of length prefixed component payloads, with
//! each payload produced by the [PrimitiveCodec] registered for its type.
//!
//! ```
//! use tuplex_codec::{DataType, TupleType, Value};
//!
//! let column = TupleType::of(&[DataType::Ascii, DataType::Int, DataType::Boolean])?;
//! let narrow = TupleType::of(&[DataType::Ascii, DataType::Int])?;
//!
//! let literal = narrow.new_value_from([Some(Value::from("bar")), Some(Value::from(456))])?;
//! let read = column.decode(&literal.encode())?;
//!
//! assert_eq!(read, column.new_value_from([Some(Value::from("bar")), Some(Value::from(456)), None])?);
//! assert_eq!(read.to_string(), "('bar', 456, NULL)");
//! # Ok::<(), tuplex_codec::TupleError>(())
//! ```

mod error;
pub mod tuple;
pub mod types;

#[cfg(test)]
mod proptests;

pub use self::error::{CodecError, Malformed, ParseTypeError, TupleError};
pub use self::tuple::{decode, decode_bytes, encode, encode_into, format, TupleType, TupleValue};
pub use self::types::{CodecRegistry, DataType, Decimal, FromValue, PrimitiveCodec, Value};
