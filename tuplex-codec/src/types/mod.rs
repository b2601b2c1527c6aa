//! Scalar data types and the primitive codecs which move them to and from bytes.
//!
//! Composite values never interpret component bytes themselves, every
//! component is handed to the [PrimitiveCodec] registered for its [DataType]
//! within a [CodecRegistry].

mod codec;
mod registry;
mod value;

use std::fmt;
use std::str::FromStr;

pub use self::codec::{
    BigintCodec,
    BlobCodec,
    BooleanCodec,
    DecimalCodec,
    DoubleCodec,
    FloatCodec,
    InetCodec,
    IntCodec,
    PrimitiveCodec,
    TextCodec,
    TimestampCodec,
    UuidCodec,
    VarintCodec,
};
pub use self::registry::CodecRegistry;
pub use self::value::{Decimal, FromValue, Value};
use crate::error::ParseTypeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A CQL scalar data type.
pub enum DataType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    /// Distributed counter, encoded as a bigint.
    ///
    /// Counters cannot be used as tuple components.
    Counter,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    Text,
    /// Milliseconds since the unix epoch.
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    /// A version 1 (time based) UUID.
    Timeuuid,
}

impl DataType {
    /// Every scalar data type, in declaration order.
    pub const ALL: [DataType; 16] = [
        DataType::Ascii,
        DataType::Bigint,
        DataType::Blob,
        DataType::Boolean,
        DataType::Counter,
        DataType::Decimal,
        DataType::Double,
        DataType::Float,
        DataType::Inet,
        DataType::Int,
        DataType::Text,
        DataType::Timestamp,
        DataType::Uuid,
        DataType::Varchar,
        DataType::Varint,
        DataType::Timeuuid,
    ];

    /// Returns the CQL name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Ascii => "ascii",
            DataType::Bigint => "bigint",
            DataType::Blob => "blob",
            DataType::Boolean => "boolean",
            DataType::Counter => "counter",
            DataType::Decimal => "decimal",
            DataType::Double => "double",
            DataType::Float => "float",
            DataType::Inet => "inet",
            DataType::Int => "int",
            DataType::Text => "text",
            DataType::Timestamp => "timestamp",
            DataType::Uuid => "uuid",
            DataType::Varchar => "varchar",
            DataType::Varint => "varint",
            DataType::Timeuuid => "timeuuid",
        }
    }

    #[inline]
    /// Returns `true` if values of this type are rendered as quoted strings.
    pub const fn is_text_like(self) -> bool {
        matches!(self, DataType::Ascii | DataType::Text | DataType::Varchar)
    }

    #[inline]
    /// Returns `true` if the type may appear as a tuple component.
    pub const fn is_tuple_component(self) -> bool {
        !matches!(self, DataType::Counter)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DataType::ALL
            .into_iter()
            .find(|dt| dt.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseTypeError::UnknownType(name.to_string()))
    }
}
