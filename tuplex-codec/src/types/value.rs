use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DataType;
use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq)]
/// A single, non-null scalar value.
///
/// Each variant is a value *kind*, several [DataType]s may share one kind,
/// i.e. `ascii`, `text` and `varchar` all hold [Value::Text].
pub enum Value {
    /// `ascii`, `text` and `varchar`.
    Text(String),
    /// `bigint` and `counter`.
    Bigint(i64),
    Int(i32),
    Blob(Bytes),
    Boolean(bool),
    Decimal(Decimal),
    Double(f64),
    Float(f32),
    Inet(IpAddr),
    Timestamp(DateTime<Utc>),
    /// `uuid` and `timeuuid`.
    Uuid(Uuid),
    Varint(i128),
}

impl Value {
    /// Returns a short name for the kind of value held.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bigint(_) => "bigint",
            Value::Int(_) => "int",
            Value::Blob(_) => "blob",
            Value::Boolean(_) => "boolean",
            Value::Decimal(_) => "decimal",
            Value::Double(_) => "double",
            Value::Float(_) => "float",
            Value::Inet(_) => "inet",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Varint(_) => "varint",
        }
    }
}

macro_rules! value_from {
    ($t:ty => $variant:ident) => {
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

value_from!(String => Text);
value_from!(&str => Text);
value_from!(i64 => Bigint);
value_from!(i32 => Int);
value_from!(Bytes => Blob);
value_from!(Vec<u8> => Blob);
value_from!(bool => Boolean);
value_from!(Decimal => Decimal);
value_from!(f64 => Double);
value_from!(f32 => Float);
value_from!(IpAddr => Inet);
value_from!(Ipv4Addr => Inet);
value_from!(Ipv6Addr => Inet);
value_from!(DateTime<Utc> => Timestamp);
value_from!(Uuid => Uuid);
value_from!(i128 => Varint);

/// Conversion out of a [Value] for the typed tuple getters.
pub trait FromValue: Sized {
    /// The name reported when the conversion is rejected.
    const KIND: &'static str;

    /// Returns `true` if values of the given component type can be read as `Self`.
    fn accepts(data_type: DataType) -> bool;

    /// Converts the value, returning `None` if the kind does not match.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! from_value {
    ($t:ty, $kind:literal, $variant:ident, [$($dt:ident),+]) => {
        impl FromValue for $t {
            const KIND: &'static str = $kind;

            #[inline]
            fn accepts(data_type: DataType) -> bool {
                matches!(data_type, $(DataType::$dt)|+)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

from_value!(String, "String", Text, [Ascii, Text, Varchar]);
from_value!(i64, "i64", Bigint, [Bigint, Counter]);
from_value!(i32, "i32", Int, [Int]);
from_value!(Bytes, "Bytes", Blob, [Blob]);
from_value!(bool, "bool", Boolean, [Boolean]);
from_value!(Decimal, "Decimal", Decimal, [Decimal]);
from_value!(f64, "f64", Double, [Double]);
from_value!(f32, "f32", Float, [Float]);
from_value!(IpAddr, "IpAddr", Inet, [Inet]);
from_value!(DateTime<Utc>, "DateTime<Utc>", Timestamp, [Timestamp]);
from_value!(Uuid, "Uuid", Uuid, [Uuid, Timeuuid]);
from_value!(i128, "i128", Varint, [Varint]);

impl FromValue for Value {
    const KIND: &'static str = "Value";

    fn accepts(_data_type: DataType) -> bool {
        true
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// An arbitrary precision decimal, `unscaled * 10^-scale`.
///
/// The unscaled value is limited to the 128-bit signed range.
pub struct Decimal {
    unscaled: i128,
    scale: i32,
}

impl Decimal {
    pub const fn new(unscaled: i128, scale: i32) -> Self {
        Self { unscaled, scale }
    }

    #[inline]
    pub const fn unscaled(&self) -> i128 {
        self.unscaled
    }

    #[inline]
    pub const fn scale(&self) -> i32 {
        self.scale
    }
}

impl fmt::Display for Decimal {
    /// Renders the decimal in plain notation where possible, falling back
    /// to scientific notation for negative scales or very small magnitudes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.unsigned_abs().to_string();
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let scale = i64::from(self.scale);
        let adjusted = (digits.len() as i64 - 1) - scale;

        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        if scale > 0 && adjusted >= -6 {
            let scale = scale as usize;
            return if digits.len() > scale {
                let (int, frac) = digits.split_at(digits.len() - scale);
                write!(f, "{sign}{int}.{frac}")
            } else {
                let zeros = "0".repeat(scale - digits.len());
                write!(f, "{sign}0.{zeros}{digits}")
            };
        }

        let (first, rest) = digits.split_at(1);
        write!(f, "{sign}{first}")?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        if adjusted >= 0 {
            write!(f, "E+{adjusted}")
        } else {
            write!(f, "E{adjusted}")
        }
    }
}

impl FromStr for Decimal {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CodecError::InvalidLiteral {
            data_type: DataType::Decimal,
            literal: s.to_string(),
        };

        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(pos) => {
                let exp = s[pos + 1..].parse::<i32>().map_err(|_| invalid())?;
                (&s[..pos], exp)
            },
            None => (s, 0),
        };

        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        let unsigned_int = int.strip_prefix(['-', '+']).unwrap_or(int);
        if (unsigned_int.is_empty() && frac.is_empty())
            || !digits_only(unsigned_int)
            || !digits_only(frac)
        {
            return Err(invalid());
        }

        let unscaled = format!("{int}{frac}")
            .parse::<i128>()
            .map_err(|_| CodecError::Overflow {
                data_type: DataType::Decimal,
            })?;
        let scale = i32::try_from(frac.len())
            .ok()
            .and_then(|frac_len| frac_len.checked_sub(exponent))
            .ok_or_else(invalid)?;

        Ok(Self { unscaled, scale })
    }
}
