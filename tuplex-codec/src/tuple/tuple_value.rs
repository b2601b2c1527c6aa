use std::hash::{Hash, Hasher};

use bytes::{Bytes, BytesMut};

use super::TupleType;
use crate::error::{CodecError, TupleError};
use crate::types::{FromValue, Value};

#[derive(Debug, Clone)]
/// A positionally typed value bound to a [TupleType].
///
/// Every slot holds either the encoded payload of its component or null,
/// values are type checked and encoded when they are set so that errors
/// surface at the point of the write rather than on the wire.
///
/// Values are single owner, mutating the same value from multiple threads
/// requires external synchronization.
pub struct TupleValue {
    tuple_type: TupleType,
    slots: Box<[Option<Bytes>]>,
}

impl TupleValue {
    pub(crate) fn empty(tuple_type: TupleType) -> Self {
        let slots = vec![None; tuple_type.arity()].into_boxed_slice();
        Self { tuple_type, slots }
    }

    /// Creates a value from already validated payloads.
    ///
    /// The number of slots must equal the arity of the type.
    pub(crate) fn from_slots(tuple_type: TupleType, slots: Vec<Option<Bytes>>) -> Self {
        debug_assert_eq!(tuple_type.arity(), slots.len());
        Self {
            tuple_type,
            slots: slots.into_boxed_slice(),
        }
    }

    #[inline]
    /// The tuple type this value is bound to.
    pub fn tuple_type(&self) -> &TupleType {
        &self.tuple_type
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<Bytes>] {
        &self.slots
    }

    fn check_index(&self, index: usize) -> Result<(), TupleError> {
        if index >= self.arity() {
            return Err(TupleError::IndexOutOfRange {
                index,
                arity: self.arity(),
            });
        }
        Ok(())
    }

    /// Sets the component at `index`.
    ///
    /// The value must be representable as the declared component type,
    /// otherwise a [TupleError::TypeMismatch] is returned and the slot
    /// is left unchanged.
    pub fn set<V>(&mut self, index: usize, value: V) -> Result<&mut Self, TupleError>
    where
        V: Into<Value>,
    {
        self.check_index(index)?;
        let payload = self.tuple_type.encode_component(index, &value.into())?;
        self.slots[index] = Some(payload);
        Ok(self)
    }

    /// Sets the component at `index` to null, this is valid for any component type.
    pub fn set_null(&mut self, index: usize) -> Result<&mut Self, TupleError> {
        self.check_index(index)?;
        self.slots[index] = None;
        Ok(self)
    }

    /// Sets the component at `index` to the given value or null.
    pub fn set_option<V>(&mut self, index: usize, value: Option<V>) -> Result<&mut Self, TupleError>
    where
        V: Into<Value>,
    {
        match value {
            Some(value) => self.set(index, value),
            None => self.set_null(index),
        }
    }

    /// Sets the component at `index` from its raw payload.
    ///
    /// The payload is validated by the component's codec before it is stored.
    pub fn set_raw(&mut self, index: usize, payload: Bytes) -> Result<&mut Self, TupleError> {
        let data_type = self.tuple_type.component_type(index)?;
        let codec = self.tuple_type.codec(index)?;
        codec
            .decode(&payload)
            .map_err(|source| TupleError::TypeMismatch {
                index,
                data_type,
                source,
            })?;
        if i32::try_from(payload.len()).is_err() {
            return Err(TupleError::TypeMismatch {
                index,
                data_type,
                source: CodecError::TooLarge { len: payload.len() },
            });
        }
        self.slots[index] = Some(payload);
        Ok(self)
    }

    /// Returns `true` if the component at `index` is null.
    pub fn is_null(&self, index: usize) -> Result<bool, TupleError> {
        self.check_index(index)?;
        Ok(self.slots[index].is_none())
    }

    /// Returns the raw payload of the component at `index`, `None` if null.
    pub fn raw(&self, index: usize) -> Result<Option<&Bytes>, TupleError> {
        self.check_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Returns the decoded component at `index`, `None` if null.
    pub fn get(&self, index: usize) -> Result<Option<Value>, TupleError> {
        self.get_as::<Value>(index)
    }

    /// Returns the component at `index` converted to `T`, `None` if null.
    ///
    /// A [TupleError::TypeMismatch] is returned if the declared component
    /// type cannot be read as `T`. Null components never fail the conversion.
    pub fn get_as<T>(&self, index: usize) -> Result<Option<T>, TupleError>
    where
        T: FromValue,
    {
        self.check_index(index)?;
        let Some(payload) = &self.slots[index] else {
            return Ok(None);
        };

        let data_type = self.tuple_type.component_type(index)?;
        let mismatch = || TupleError::TypeMismatch {
            index,
            data_type,
            source: CodecError::KindMismatch {
                expected: data_type,
                found: T::KIND,
            },
        };

        if !T::accepts(data_type) {
            return Err(mismatch());
        }

        let value = self
            .tuple_type
            .codec(index)?
            .decode(payload)
            .map_err(|source| TupleError::TypeMismatch {
                index,
                data_type,
                source,
            })?;

        T::from_value(value).map(Some).ok_or_else(mismatch)
    }

    /// Returns an iterator decoding every component in order.
    pub fn values(&self) -> impl Iterator<Item = Result<Option<Value>, TupleError>> + '_ {
        (0..self.arity()).map(|index| self.get(index))
    }

    /// Encodes the value into its wire form.
    ///
    /// See [encode](super::encode).
    pub fn encode(&self) -> Bytes {
        super::encode(self)
    }

    /// Writes the wire form of the value into `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        super::encode_into(self, buf)
    }

    /// Renders the value as a CQL tuple literal.
    ///
    /// See [format](super::format).
    pub fn format(&self) -> Result<String, TupleError> {
        super::format(self)
    }
}

impl PartialEq for TupleValue {
    fn eq(&self, other: &Self) -> bool {
        self.tuple_type == other.tuple_type && self.slots == other.slots
    }
}

impl Eq for TupleValue {}

impl Hash for TupleValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tuple_type.hash(state);
        self.slots.hash(state);
    }
}
