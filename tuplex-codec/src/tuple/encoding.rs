use bytes::{BufMut, Bytes, BytesMut};

use super::TupleValue;

/// The length written in place of a null component's payload.
pub const NULL_LENGTH: i32 = -1;

/// The size of the length header preceding each component.
pub(crate) const LENGTH_HEADER_SIZE: usize = 4;

/// Returns the number of bytes [encode] produces for the value.
pub fn encoded_len(value: &TupleValue) -> usize {
    value
        .slots()
        .iter()
        .map(|slot| LENGTH_HEADER_SIZE + slot.as_ref().map_or(0, Bytes::len))
        .sum()
}

/// Encodes the value into its wire form.
///
/// One length prefixed chunk is written per component of the value's own
/// tuple type, null components are written as a [NULL_LENGTH] header with
/// no payload.
pub fn encode(value: &TupleValue) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(value));
    encode_into(value, &mut buf);
    buf.freeze()
}

/// Writes the wire form of the value into `buf`.
pub fn encode_into(value: &TupleValue, buf: &mut BytesMut) {
    buf.reserve(encoded_len(value));
    for slot in value.slots() {
        match slot {
            // Payload lengths are checked to fit an i32 when the slot is set.
            Some(payload) => {
                buf.put_i32(payload.len() as i32);
                buf.put_slice(payload);
            },
            None => buf.put_i32(NULL_LENGTH),
        }
    }
}
