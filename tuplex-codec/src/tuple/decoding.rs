use bytes::{Buf, Bytes};
use tracing::{debug, trace};

use super::encoding::{LENGTH_HEADER_SIZE, NULL_LENGTH};
use super::{TupleType, TupleValue};
use crate::error::{Malformed, TupleError};

/// Decodes wire bytes into a value of the `target` tuple type.
///
/// Components are read in order until the target arity is reached. If the
/// input is exhausted first, the remaining components are null; this is how
/// values written with a narrower tuple type are read back from a wider one.
///
/// Returns [TupleError::MalformedTuple] if a length header or payload is
/// truncated, a payload is rejected by its codec, or bytes remain once every
/// component of the target type has been read.
pub fn decode(bytes: &[u8], target: &TupleType) -> Result<TupleValue, TupleError> {
    decode_bytes(Bytes::copy_from_slice(bytes), target)
}

/// Decodes wire bytes into a value of the `target` tuple type without
/// copying the component payloads.
///
/// See [decode].
pub fn decode_bytes(mut bytes: Bytes, target: &TupleType) -> Result<TupleValue, TupleError> {
    let total = bytes.len();
    let arity = target.arity();
    let mut slots = Vec::with_capacity(arity);

    for index in 0..arity {
        if !bytes.has_remaining() {
            debug!(
                present = index,
                arity, "Tuple has fewer components than its target type, padding with nulls"
            );
            break;
        }

        let offset = total - bytes.remaining();
        if bytes.remaining() < LENGTH_HEADER_SIZE {
            return Err(TupleError::MalformedTuple {
                offset,
                reason: Malformed::TruncatedLength {
                    remaining: bytes.remaining(),
                },
            });
        }

        let len = bytes.get_i32();
        if len == NULL_LENGTH {
            trace!(index, "Decoded null tuple component");
            slots.push(None);
            continue;
        }

        let declared = usize::try_from(len).map_err(|_| TupleError::MalformedTuple {
            offset,
            reason: Malformed::NegativeLength(len),
        })?;

        if bytes.remaining() < declared {
            return Err(TupleError::MalformedTuple {
                offset,
                reason: Malformed::TruncatedPayload {
                    declared,
                    remaining: bytes.remaining(),
                },
            });
        }

        let payload = bytes.split_to(declared);
        target
            .codec(index)?
            .decode(&payload)
            .map_err(|source| TupleError::MalformedTuple {
                offset,
                reason: Malformed::InvalidPayload { index, source },
            })?;

        trace!(index, len = declared, "Decoded tuple component");
        slots.push(Some(payload));
    }

    if bytes.has_remaining() {
        return Err(TupleError::MalformedTuple {
            offset: total - bytes.remaining(),
            reason: Malformed::TrailingBytes {
                remaining: bytes.remaining(),
            },
        });
    }

    slots.resize(arity, None);
    Ok(TupleValue::from_slots(target.clone(), slots))
}
