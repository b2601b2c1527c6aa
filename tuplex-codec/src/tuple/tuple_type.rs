use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;

use super::TupleValue;
use crate::error::{CodecError, ParseTypeError, TupleError};
use crate::types::{CodecRegistry, DataType, PrimitiveCodec, Value};

#[derive(Clone)]
/// An immutable, ordered schema of component types.
///
/// Tuple types are cheap to clone and can be shared between threads, every
/// [TupleValue] keeps a clone of the type it was created from.
///
/// Two tuple types are equal if they have the same component types in the
/// same order, the codec registry they were built with is not considered.
pub struct TupleType {
    components: Arc<[DataType]>,
    registry: Arc<CodecRegistry>,
}

impl TupleType {
    /// Creates a new tuple type using the shared default codec registry.
    ///
    /// Returns [TupleError::InvalidArity] if no components are given.
    pub fn new<I>(components: I) -> Result<Self, TupleError>
    where
        I: IntoIterator<Item = DataType>,
    {
        Self::with_registry(components, CodecRegistry::shared_default())
    }

    /// Creates a new tuple type from a slice of component types.
    pub fn of(components: &[DataType]) -> Result<Self, TupleError> {
        Self::new(components.iter().copied())
    }

    /// Creates a new tuple type whose values resolve their codecs through
    /// the given registry.
    ///
    /// Codecs are only looked up for components which hold a value, so the
    /// registry does not need to cover every component type.
    pub fn with_registry<I>(
        components: I,
        registry: Arc<CodecRegistry>,
    ) -> Result<Self, TupleError>
    where
        I: IntoIterator<Item = DataType>,
    {
        let components: Arc<[DataType]> = components.into_iter().collect();

        if components.is_empty() {
            return Err(TupleError::InvalidArity);
        }

        if let Some((index, &data_type)) = components
            .iter()
            .enumerate()
            .find(|(_, dt)| !dt.is_tuple_component())
        {
            return Err(TupleError::UnsupportedComponent { index, data_type });
        }

        Ok(Self {
            components,
            registry,
        })
    }

    #[inline]
    /// The number of components in the tuple type.
    pub fn arity(&self) -> usize {
        self.components.len()
    }

    /// Returns the component type at the given position.
    pub fn component_type(&self, index: usize) -> Result<DataType, TupleError> {
        self.components
            .get(index)
            .copied()
            .ok_or(TupleError::IndexOutOfRange {
                index,
                arity: self.arity(),
            })
    }

    #[inline]
    pub fn component_types(&self) -> &[DataType] {
        &self.components
    }

    #[inline]
    /// The codec registry values of this type use.
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    /// Returns a new value of this type with every component null.
    pub fn new_value(&self) -> TupleValue {
        TupleValue::empty(self.clone())
    }

    /// Returns a new value of this type populated positionally.
    ///
    /// Exactly [Self::arity] values must be given, a `None` sets the
    /// component to null. Fails with [TupleError::ArityMismatch] on a count
    /// mismatch or [TupleError::TypeMismatch] if a value is not valid for
    /// its component type.
    pub fn new_value_from<I>(&self, values: I) -> Result<TupleValue, TupleError>
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        let values: Vec<Option<Value>> = values.into_iter().collect();
        if values.len() != self.arity() {
            return Err(TupleError::ArityMismatch {
                expected: self.arity(),
                actual: values.len(),
            });
        }

        let mut tuple = self.new_value();
        for (index, value) in values.into_iter().enumerate() {
            match value {
                Some(value) => tuple.set(index, value)?,
                None => tuple.set_null(index)?,
            };
        }
        Ok(tuple)
    }

    /// Decodes wire bytes against this type.
    ///
    /// See [decode](super::decode).
    pub fn decode(&self, bytes: &[u8]) -> Result<TupleValue, TupleError> {
        super::decode(bytes, self)
    }

    /// Resolves the codec for the component at the given position.
    pub(crate) fn codec(&self, index: usize) -> Result<&dyn PrimitiveCodec, TupleError> {
        let data_type = self.component_type(index)?;
        self.registry.codec_for(data_type)
    }

    /// Encodes a value for the component at the given position.
    pub(crate) fn encode_component(
        &self,
        index: usize,
        value: &Value,
    ) -> Result<Bytes, TupleError> {
        let data_type = self.component_type(index)?;
        let codec = self.registry.codec_for(data_type)?;

        let mut buf = bytes::BytesMut::new();
        codec
            .encode(value, &mut buf)
            .map_err(|source| TupleError::TypeMismatch {
                index,
                data_type,
                source,
            })?;

        if i32::try_from(buf.len()).is_err() {
            return Err(TupleError::TypeMismatch {
                index,
                data_type,
                source: CodecError::TooLarge { len: buf.len() },
            });
        }

        Ok(buf.freeze())
    }
}

impl PartialEq for TupleType {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for TupleType {}

impl Hash for TupleType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tuple<")?;
        for (i, dt) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dt}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Debug for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TupleType({self})")
    }
}

impl FromStr for TupleType {
    type Err = ParseTypeError;

    /// Parses `tuple<type, ...>`, optionally wrapped in `frozen<...>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTypeError::InvalidTupleSyntax(s.to_string());

        let mut inner = s.trim();
        if let Some(rest) = strip_wrapper(inner, "frozen") {
            inner = rest.trim();
        }
        let inner = strip_wrapper(inner, "tuple").ok_or_else(invalid)?;

        if inner.trim().is_empty() {
            return Err(TupleError::InvalidArity.into());
        }

        let components = inner
            .split(',')
            .map(DataType::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(components)?)
    }
}

/// Strips `name<` ... `>` from the input, case-insensitively.
fn strip_wrapper<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}
