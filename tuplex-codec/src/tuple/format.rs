use std::fmt;

use bytes::Bytes;

use super::TupleValue;
use crate::error::TupleError;

/// The literal rendered for null components.
pub const NULL_LITERAL: &str = "NULL";

/// Renders the value as a CQL tuple literal, i.e. `(1, 'a', 1.0)`.
///
/// Exactly one element is rendered per component of the value's own type,
/// the literal is never padded out to a wider type.
pub fn format(value: &TupleValue) -> Result<String, TupleError> {
    let mut out = String::from("(");

    for (index, slot) in value.slots().iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }

        match slot {
            Some(payload) => out.push_str(&element(value, index, payload)?),
            None => out.push_str(NULL_LITERAL),
        }
    }

    out.push(')');
    Ok(out)
}

fn element(value: &TupleValue, index: usize, payload: &Bytes) -> Result<String, TupleError> {
    let tuple_type = value.tuple_type();
    let data_type = tuple_type.component_type(index)?;
    let codec = tuple_type.codec(index)?;
    codec
        .decode(payload)
        .and_then(|v| codec.format(&v))
        .map_err(|source| TupleError::TypeMismatch {
            index,
            data_type,
            source,
        })
}

/// Renders the value like [format], except that a component whose codec
/// cannot render it is written as its raw payload in `0x<hex>` form.
impl fmt::Display for TupleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, slot) in self.slots().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            let Some(payload) = slot else {
                f.write_str(NULL_LITERAL)?;
                continue;
            };

            match element(self, index, payload) {
                Ok(literal) => f.write_str(&literal)?,
                Err(_) => write!(f, "0x{}", hex::encode(payload))?,
            }
        }
        f.write_str(")")
    }
}
