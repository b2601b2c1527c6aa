use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DataType, Decimal, Value};
use crate::error::CodecError;

/// The timestamp literal format, always rendered in UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Encode, decode and literal rendering for a single scalar [DataType].
///
/// Implementations must be pure, they are shared between threads through
/// the [CodecRegistry](super::CodecRegistry) without any synchronization.
pub trait PrimitiveCodec: Debug + Send + Sync {
    /// The data type this codec handles.
    fn data_type(&self) -> DataType;

    /// Writes the payload bytes of `value` into `buf`.
    ///
    /// Nothing is written if the value is rejected.
    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError>;

    /// Reads a value from its exact payload bytes.
    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError>;

    /// Renders the value as a CQL literal.
    fn format(&self, value: &Value) -> Result<String, CodecError>;
}

#[inline]
fn mismatch(expected: DataType, value: &Value) -> CodecError {
    CodecError::KindMismatch {
        expected,
        found: value.kind(),
    }
}

/// Copies a fixed width payload, checking its length.
fn fixed<const N: usize>(data_type: DataType, payload: &[u8]) -> Result<[u8; N], CodecError> {
    payload.try_into().map_err(|_| CodecError::InvalidLength {
        data_type,
        expected: fixed_len_name(N),
        actual: payload.len(),
    })
}

const fn fixed_len_name(n: usize) -> &'static str {
    match n {
        1 => "1",
        4 => "4",
        8 => "8",
        16 => "16",
        _ => "a fixed number of",
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Renders floats with a fractional part and Java style non-finite names.
macro_rules! float_literal {
    ($v:expr) => {{
        let v = $v;
        if v.is_nan() {
            "NaN".to_string()
        } else if v.is_infinite() {
            let name = if v > 0.0 { "Infinity" } else { "-Infinity" };
            name.to_string()
        } else {
            with_fraction(format!("{v:?}"))
        }
    }};
}

/// Inserts `.0` into exponent forms without a fractional part, `1e20` becomes `1.0e20`.
fn with_fraction(literal: String) -> String {
    match literal.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{mantissa}.0e{exponent}")
        },
        _ => literal,
    }
}

/// Encodes an integer as minimal big-endian two's complement.
pub(crate) fn encode_varint(value: i128, buf: &mut BytesMut) {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    buf.put_slice(&bytes[start..]);
}

pub(crate) fn decode_varint(data_type: DataType, payload: &[u8]) -> Result<i128, CodecError> {
    if payload.is_empty() {
        return Err(CodecError::InvalidLength {
            data_type,
            expected: "at least 1",
            actual: 0,
        });
    }
    if payload.len() > 16 {
        return Err(CodecError::Overflow { data_type });
    }

    let fill = if payload[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut bytes = [fill; 16];
    bytes[16 - payload.len()..].copy_from_slice(payload);
    Ok(i128::from_be_bytes(bytes))
}

#[derive(Debug, Clone, Copy)]
/// `ascii`, `text` and `varchar`, stored as UTF-8.
pub struct TextCodec {
    data_type: DataType,
}

impl TextCodec {
    pub const fn ascii() -> Self {
        Self {
            data_type: DataType::Ascii,
        }
    }

    pub const fn text() -> Self {
        Self {
            data_type: DataType::Text,
        }
    }

    pub const fn varchar() -> Self {
        Self {
            data_type: DataType::Varchar,
        }
    }

    fn check(&self, s: &str) -> Result<(), CodecError> {
        if self.data_type == DataType::Ascii && !s.is_ascii() {
            return Err(CodecError::NonAscii);
        }
        Ok(())
    }
}

impl PrimitiveCodec for TextCodec {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        let Value::Text(s) = value else {
            return Err(mismatch(self.data_type, value));
        };
        self.check(s)?;
        buf.put_slice(s.as_bytes());
        Ok(())
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let s = std::str::from_utf8(payload).map_err(|source| CodecError::InvalidUtf8 {
            data_type: self.data_type,
            source,
        })?;
        self.check(s)?;
        Ok(Value::Text(s.to_string()))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Text(s) => Ok(quote(s)),
            other => Err(mismatch(self.data_type, other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// `bigint` and `counter`, 8 byte signed integers.
pub struct BigintCodec {
    data_type: DataType,
}

impl BigintCodec {
    pub const fn bigint() -> Self {
        Self {
            data_type: DataType::Bigint,
        }
    }

    pub const fn counter() -> Self {
        Self {
            data_type: DataType::Counter,
        }
    }
}

impl PrimitiveCodec for BigintCodec {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Bigint(v) => {
                buf.put_i64(*v);
                Ok(())
            },
            other => Err(mismatch(self.data_type, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let bytes = fixed::<8>(self.data_type, payload)?;
        Ok(Value::Bigint(i64::from_be_bytes(bytes)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Bigint(v) => Ok(v.to_string()),
            other => Err(mismatch(self.data_type, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl PrimitiveCodec for IntCodec {
    fn data_type(&self) -> DataType {
        DataType::Int
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Int(v) => {
                buf.put_i32(*v);
                Ok(())
            },
            other => Err(mismatch(DataType::Int, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let bytes = fixed::<4>(DataType::Int, payload)?;
        Ok(Value::Int(i32::from_be_bytes(bytes)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Int(v) => Ok(v.to_string()),
            other => Err(mismatch(DataType::Int, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlobCodec;

impl PrimitiveCodec for BlobCodec {
    fn data_type(&self) -> DataType {
        DataType::Blob
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Blob(v) => {
                buf.put_slice(v);
                Ok(())
            },
            other => Err(mismatch(DataType::Blob, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        Ok(Value::Blob(Bytes::copy_from_slice(payload)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Blob(v) => Ok(format!("0x{}", hex::encode(v))),
            other => Err(mismatch(DataType::Blob, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl PrimitiveCodec for BooleanCodec {
    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Boolean(v) => {
                buf.put_u8(u8::from(*v));
                Ok(())
            },
            other => Err(mismatch(DataType::Boolean, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let [byte] = fixed::<1>(DataType::Boolean, payload)?;
        Ok(Value::Boolean(byte != 0))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Boolean(v) => Ok(v.to_string()),
            other => Err(mismatch(DataType::Boolean, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// A 4 byte scale followed by the unscaled value as a varint.
pub struct DecimalCodec;

impl PrimitiveCodec for DecimalCodec {
    fn data_type(&self) -> DataType {
        DataType::Decimal
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Decimal(d) => {
                buf.put_i32(d.scale());
                encode_varint(d.unscaled(), buf);
                Ok(())
            },
            other => Err(mismatch(DataType::Decimal, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        if payload.len() < 5 {
            return Err(CodecError::InvalidLength {
                data_type: DataType::Decimal,
                expected: "at least 5",
                actual: payload.len(),
            });
        }
        let (scale, unscaled) = payload.split_at(4);
        let scale = i32::from_be_bytes(fixed::<4>(DataType::Decimal, scale)?);
        let unscaled = decode_varint(DataType::Decimal, unscaled)?;
        Ok(Value::Decimal(Decimal::new(unscaled, scale)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Decimal(d) => Ok(d.to_string()),
            other => Err(mismatch(DataType::Decimal, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCodec;

impl PrimitiveCodec for DoubleCodec {
    fn data_type(&self) -> DataType {
        DataType::Double
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Double(v) => {
                buf.put_f64(*v);
                Ok(())
            },
            other => Err(mismatch(DataType::Double, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let bytes = fixed::<8>(DataType::Double, payload)?;
        Ok(Value::Double(f64::from_be_bytes(bytes)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Double(v) => Ok(float_literal!(*v)),
            other => Err(mismatch(DataType::Double, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl PrimitiveCodec for FloatCodec {
    fn data_type(&self) -> DataType {
        DataType::Float
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Float(v) => {
                buf.put_f32(*v);
                Ok(())
            },
            other => Err(mismatch(DataType::Float, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let bytes = fixed::<4>(DataType::Float, payload)?;
        Ok(Value::Float(f32::from_be_bytes(bytes)))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Float(v) => Ok(float_literal!(*v)),
            other => Err(mismatch(DataType::Float, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// IPv4 (4 bytes) or IPv6 (16 bytes) addresses.
pub struct InetCodec;

impl PrimitiveCodec for InetCodec {
    fn data_type(&self) -> DataType {
        DataType::Inet
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Inet(IpAddr::V4(addr)) => buf.put_slice(&addr.octets()),
            Value::Inet(IpAddr::V6(addr)) => buf.put_slice(&addr.octets()),
            other => return Err(mismatch(DataType::Inet, other)),
        }
        Ok(())
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let addr = match payload.len() {
            4 => IpAddr::V4(Ipv4Addr::from(fixed::<4>(DataType::Inet, payload)?)),
            16 => IpAddr::V6(Ipv6Addr::from(fixed::<16>(DataType::Inet, payload)?)),
            actual => {
                return Err(CodecError::InvalidLength {
                    data_type: DataType::Inet,
                    expected: "4 or 16",
                    actual,
                })
            },
        };
        Ok(Value::Inet(addr))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Inet(addr) => Ok(quote(&addr.to_string())),
            other => Err(mismatch(DataType::Inet, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Milliseconds since the unix epoch as an 8 byte signed integer.
///
/// Sub-millisecond precision is truncated on encode.
pub struct TimestampCodec;

impl PrimitiveCodec for TimestampCodec {
    fn data_type(&self) -> DataType {
        DataType::Timestamp
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Timestamp(ts) => {
                buf.put_i64(ts.timestamp_millis());
                Ok(())
            },
            other => Err(mismatch(DataType::Timestamp, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let millis = i64::from_be_bytes(fixed::<8>(DataType::Timestamp, payload)?);
        let ts = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or(CodecError::TimestampOutOfRange { millis })?;
        Ok(Value::Timestamp(ts))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Timestamp(ts) => Ok(quote(&ts.format(TIMESTAMP_FORMAT).to_string())),
            other => Err(mismatch(DataType::Timestamp, other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// `uuid` and `timeuuid`, 16 raw bytes.
pub struct UuidCodec {
    data_type: DataType,
}

impl UuidCodec {
    pub const fn uuid() -> Self {
        Self {
            data_type: DataType::Uuid,
        }
    }

    pub const fn timeuuid() -> Self {
        Self {
            data_type: DataType::Timeuuid,
        }
    }

    fn check(&self, uuid: &Uuid) -> Result<(), CodecError> {
        let version = uuid.get_version_num();
        if self.data_type == DataType::Timeuuid && version != 1 {
            return Err(CodecError::NotTimeBased { version });
        }
        Ok(())
    }
}

impl PrimitiveCodec for UuidCodec {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        let Value::Uuid(uuid) = value else {
            return Err(mismatch(self.data_type, value));
        };
        self.check(uuid)?;
        buf.put_slice(uuid.as_bytes());
        Ok(())
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        let uuid = Uuid::from_bytes(fixed::<16>(self.data_type, payload)?);
        self.check(&uuid)?;
        Ok(Value::Uuid(uuid))
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Uuid(uuid) => Ok(uuid.hyphenated().to_string()),
            other => Err(mismatch(self.data_type, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Arbitrary precision integers as minimal two's complement, limited to 128 bits.
pub struct VarintCodec;

impl PrimitiveCodec for VarintCodec {
    fn data_type(&self) -> DataType {
        DataType::Varint
    }

    fn encode(&self, value: &Value, buf: &mut BytesMut) -> Result<(), CodecError> {
        match value {
            Value::Varint(v) => {
                encode_varint(*v, buf);
                Ok(())
            },
            other => Err(mismatch(DataType::Varint, other)),
        }
    }

    fn decode(&self, payload: &[u8]) -> Result<Value, CodecError> {
        decode_varint(DataType::Varint, payload).map(Value::Varint)
    }

    fn format(&self, value: &Value) -> Result<String, CodecError> {
        match value {
            Value::Varint(v) => Ok(v.to_string()),
            other => Err(mismatch(DataType::Varint, other)),
        }
    }
}
