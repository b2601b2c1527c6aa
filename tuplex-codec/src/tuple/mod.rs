//! Composite tuple types, values and their wire codec.
//!
//! # Wire Format
//!
//! A tuple is encoded as one chunk per component present in the value,
//! with no overall length or count prefix:
//!
//! ```text
//! +----------------------+-----------------+
//! | length (i32, BE)     | payload         |   component 0
//! +----------------------+-----------------+
//! | 0xFFFFFFFF (-1)      |                 |   component 1 (null)
//! +----------------------+-----------------+
//! | ...                                    |
//! ```
//!
//! The number of components written is the arity of the value's *own* type.
//! Decoding is driven by the arity of the *target* type, if the input runs out
//! first the remaining components read as null. This lets a value built from a
//! narrower tuple type be stored in, and read back from, a wider column.

mod decoding;
mod encoding;
mod format;
mod tuple_type;
mod tuple_value;

pub use self::decoding::{decode, decode_bytes};
pub use self::encoding::{encode, encode_into, encoded_len, NULL_LENGTH};
pub use self::format::{format, NULL_LITERAL};
pub use self::tuple_type::TupleType;
pub use self::tuple_value::TupleValue;
