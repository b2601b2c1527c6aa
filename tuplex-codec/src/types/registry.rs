use std::sync::{Arc, OnceLock};

use tracing::debug;

use super::codec::{
    BigintCodec,
    BlobCodec,
    BooleanCodec,
    DecimalCodec,
    DoubleCodec,
    FloatCodec,
    InetCodec,
    IntCodec,
    TextCodec,
    TimestampCodec,
    UuidCodec,
    VarintCodec,
};
use super::{DataType, PrimitiveCodec};
use crate::error::TupleError;

#[derive(Debug, Clone, Default)]
/// A set of [PrimitiveCodec]s keyed by the [DataType] they handle.
///
/// Registries are immutable once shared, a tuple type holds its registry
/// behind an [Arc] and every value derived from that type resolves its
/// component codecs through it.
pub struct CodecRegistry {
    codecs: ahash::HashMap<DataType, Arc<dyn PrimitiveCodec>>,
}

impl CodecRegistry {
    /// Creates a registry without any codecs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding a codec for every built-in [DataType].
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(TextCodec::ascii());
        registry.register(BigintCodec::bigint());
        registry.register(BlobCodec);
        registry.register(BooleanCodec);
        registry.register(BigintCodec::counter());
        registry.register(DecimalCodec);
        registry.register(DoubleCodec);
        registry.register(FloatCodec);
        registry.register(InetCodec);
        registry.register(IntCodec);
        registry.register(TextCodec::text());
        registry.register(TimestampCodec);
        registry.register(UuidCodec::uuid());
        registry.register(TextCodec::varchar());
        registry.register(VarintCodec);
        registry.register(UuidCodec::timeuuid());
        registry
    }

    /// Returns the process wide registry of built-in codecs.
    pub fn shared_default() -> Arc<CodecRegistry> {
        static REGISTRY: OnceLock<Arc<CodecRegistry>> = OnceLock::new();
        REGISTRY
            .get_or_init(|| Arc::new(CodecRegistry::with_defaults()))
            .clone()
    }

    /// Registers a codec, replacing and returning any codec previously
    /// registered for the same [DataType].
    pub fn register<C>(&mut self, codec: C) -> Option<Arc<dyn PrimitiveCodec>>
    where
        C: PrimitiveCodec + 'static,
    {
        let data_type = codec.data_type();
        let previous = self.codecs.insert(data_type, Arc::new(codec));
        if previous.is_some() {
            debug!(data_type = %data_type, "Replaced registered codec");
        }
        previous
    }

    /// Removes the codec for the given type.
    pub fn unregister(&mut self, data_type: DataType) -> Option<Arc<dyn PrimitiveCodec>> {
        self.codecs.remove(&data_type)
    }

    #[inline]
    /// Returns the codec for the given type if one is registered.
    pub fn get(&self, data_type: DataType) -> Option<&dyn PrimitiveCodec> {
        self.codecs.get(&data_type).map(|codec| codec.as_ref())
    }

    /// Returns the codec for the given type or a [TupleError::CodecNotFound].
    pub fn codec_for(&self, data_type: DataType) -> Result<&dyn PrimitiveCodec, TupleError> {
        self.get(data_type)
            .ok_or(TupleError::CodecNotFound(data_type))
    }

    #[inline]
    pub fn contains(&self, data_type: DataType) -> bool {
        self.codecs.contains_key(&data_type)
    }

    /// Returns the registered types in declaration order.
    pub fn supported_types(&self) -> Vec<DataType> {
        let mut types: Vec<DataType> = self.codecs.keys().copied().collect();
        types.sort();
        types
    }
}
