use crate::types::DataType;

#[derive(Debug, thiserror::Error)]
/// An error produced by a single primitive codec while converting
/// between a [Value](crate::Value) and its payload bytes.
pub enum CodecError {
    #[error("cannot use a {found} value as {expected}")]
    /// The value kind is not representable as the codec's data type.
    KindMismatch {
        expected: DataType,
        found: &'static str,
    },
    #[error("invalid {data_type} payload: expected {expected} bytes, got {actual}")]
    /// The payload has the wrong number of bytes for a fixed width type.
    InvalidLength {
        data_type: DataType,
        expected: &'static str,
        actual: usize,
    },
    #[error("invalid UTF-8 in {data_type} payload: {source}")]
    InvalidUtf8 {
        data_type: DataType,
        source: std::str::Utf8Error,
    },
    #[error("ascii values must only contain ASCII characters")]
    NonAscii,
    #[error("timeuuid values must be version 1 UUIDs, got version {version}")]
    NotTimeBased { version: usize },
    #[error("{data_type} value does not fit in 128 bits")]
    Overflow { data_type: DataType },
    #[error("timestamp {millis}ms is outside the supported range")]
    TimestampOutOfRange { millis: i64 },
    #[error("payload of {len} bytes exceeds the maximum component size")]
    TooLarge { len: usize },
    #[error("invalid {data_type} literal {literal:?}")]
    InvalidLiteral {
        data_type: DataType,
        literal: String,
    },
}

#[derive(Debug, thiserror::Error)]
/// The reason a tuple payload could not be decoded.
pub enum Malformed {
    #[error("expected a 4 byte length header, only {remaining} bytes remain")]
    TruncatedLength { remaining: usize },
    #[error("component declares {declared} bytes, only {remaining} bytes remain")]
    TruncatedPayload { declared: usize, remaining: usize },
    #[error("invalid component length {0}")]
    NegativeLength(i32),
    #[error("{remaining} bytes remain after all components were read")]
    TrailingBytes { remaining: usize },
    #[error("component {index} is invalid: {source}")]
    InvalidPayload { index: usize, source: CodecError },
}

#[derive(Debug, thiserror::Error)]
/// An error that can occur when building, mutating, encoding or decoding tuples.
///
/// Every error is raised at the point of violation, no tuple is ever left
/// partially mutated by a failed operation.
pub enum TupleError {
    #[error("tuple types must declare at least one component")]
    /// A tuple type was constructed without any components.
    InvalidArity,
    #[error("expected {expected} values, got {actual}")]
    /// The number of values given does not match the arity of the tuple type.
    ArityMismatch { expected: usize, actual: usize },
    #[error("type mismatch at component {index} ({data_type}): {source}")]
    /// The value is not compatible with the declared component type.
    TypeMismatch {
        index: usize,
        data_type: DataType,
        source: CodecError,
    },
    #[error("index {index} is out of range for a tuple of arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },
    #[error("malformed tuple at byte {offset}: {reason}")]
    /// The wire bytes are inconsistent with the target tuple type.
    MalformedTuple { offset: usize, reason: Malformed },
    #[error("no codec registered for {0}")]
    /// The registry the tuple type was built with has no codec for this type.
    CodecNotFound(DataType),
    #[error("{data_type} cannot be used as a tuple component (component {index})")]
    UnsupportedComponent { index: usize, data_type: DataType },
}

#[derive(Debug, thiserror::Error)]
/// An error that can occur when parsing a CQL type name.
pub enum ParseTypeError {
    #[error("unknown data type {0:?}")]
    UnknownType(String),
    #[error("invalid tuple type {0:?}, expected `tuple<type, ...>`")]
    InvalidTupleSyntax(String),
    #[error("{0}")]
    Tuple(#[from] TupleError),
}
