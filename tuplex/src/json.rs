//! Conversion between JSON arrays and tuple component values.

use std::net::IpAddr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value as Json};
use tuplex_codec::{DataType, Decimal, TupleError, TupleType, Value};
use uuid::Uuid;

/// Parses a JSON array into one optional value per component of the tuple type.
pub fn parse_values(tuple_type: &TupleType, input: &str) -> Result<Vec<Option<Value>>> {
    let json: Json = serde_json::from_str(input).context("Parse tuple values as JSON")?;
    let Json::Array(items) = json else {
        bail!("Tuple values must be a JSON array, got: {input}");
    };

    if items.len() != tuple_type.arity() {
        return Err(TupleError::ArityMismatch {
            expected: tuple_type.arity(),
            actual: items.len(),
        }
        .into());
    }

    items
        .into_iter()
        .zip(tuple_type.component_types())
        .enumerate()
        .map(|(index, (item, data_type))| {
            to_value(*data_type, item)
                .with_context(|| format!("Invalid value for component {index} ({data_type})"))
        })
        .collect()
}

/// Converts a single JSON value into a value of the given component type.
pub fn to_value(data_type: DataType, json: Json) -> Result<Option<Value>> {
    if json.is_null() {
        return Ok(None);
    }

    let value = match data_type {
        DataType::Ascii | DataType::Text | DataType::Varchar => Value::Text(expect_str(json)?),
        DataType::Bigint | DataType::Counter => Value::Bigint(expect_i64(&json)?),
        DataType::Int => {
            let n = expect_i64(&json)?;
            Value::Int(i32::try_from(n).with_context(|| format!("{n} does not fit an int"))?)
        },
        DataType::Blob => {
            let s = expect_str(json)?;
            let hex_str = s.strip_prefix("0x").unwrap_or(&s);
            Value::from(hex::decode(hex_str).context("Parse blob hex")?)
        },
        DataType::Boolean => Value::Boolean(
            json.as_bool()
                .ok_or_else(|| anyhow!("Expected a boolean, got {json}"))?,
        ),
        DataType::Decimal => {
            let literal = match json {
                Json::Number(n) => n.to_string(),
                Json::String(s) => s,
                other => bail!("Expected a number or string, got {other}"),
            };
            Value::Decimal(literal.parse::<Decimal>()?)
        },
        DataType::Double => Value::Double(expect_f64(&json)?),
        DataType::Float => {
            let wide = expect_f64(&json)?;
            let narrowed = wide as f32;
            if wide.is_finite() && !narrowed.is_finite() {
                bail!("{wide} is out of range for a float");
            }
            Value::Float(narrowed)
        },
        DataType::Inet => Value::Inet(expect_str(json)?.parse::<IpAddr>().context("Parse inet")?),
        DataType::Timestamp => {
            let ts = match json {
                Json::Number(n) => {
                    let millis = n
                        .as_i64()
                        .ok_or_else(|| anyhow!("Expected integer milliseconds, got {n}"))?;
                    DateTime::<Utc>::from_timestamp_millis(millis)
                        .ok_or_else(|| anyhow!("Timestamp {millis} is out of range"))?
                },
                Json::String(s) => DateTime::parse_from_rfc3339(&s)
                    .context("Parse RFC 3339 timestamp")?
                    .with_timezone(&Utc),
                other => bail!("Expected a number or string, got {other}"),
            };
            Value::Timestamp(ts)
        },
        DataType::Uuid | DataType::Timeuuid => {
            Value::Uuid(expect_str(json)?.parse::<Uuid>().context("Parse uuid")?)
        },
        DataType::Varint => {
            let n = match json {
                Json::Number(n) => n.to_string().parse::<i128>(),
                Json::String(s) => s.parse::<i128>(),
                other => bail!("Expected a number or string, got {other}"),
            };
            Value::Varint(n.context("Parse varint")?)
        },
    };

    Ok(Some(value))
}

/// Converts a component value into its JSON representation.
pub fn to_json(value: Option<Value>) -> Json {
    let Some(value) = value else {
        return Json::Null;
    };

    match value {
        Value::Text(s) => Json::String(s),
        Value::Bigint(n) => Json::from(n),
        Value::Int(n) => Json::from(n),
        Value::Blob(b) => Json::String(format!("0x{}", hex::encode(b))),
        Value::Boolean(b) => Json::Bool(b),
        Value::Decimal(d) => Json::String(d.to_string()),
        Value::Double(f) => float_json(f),
        Value::Float(f) => float_json(f64::from(f)),
        Value::Inet(addr) => Json::String(addr.to_string()),
        Value::Timestamp(ts) => Json::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Uuid(uuid) => Json::String(uuid.to_string()),
        Value::Varint(n) => match i64::try_from(n) {
            Ok(n) => Json::from(n),
            Err(_) => Json::String(n.to_string()),
        },
    }
}

fn float_json(f: f64) -> Json {
    Number::from_f64(f)
        .map(Json::Number)
        .unwrap_or_else(|| Json::String(f.to_string()))
}

fn expect_str(json: Json) -> Result<String> {
    match json {
        Json::String(s) => Ok(s),
        other => bail!("Expected a string, got {other}"),
    }
}

fn expect_i64(json: &Json) -> Result<i64> {
    json.as_i64()
        .ok_or_else(|| anyhow!("Expected an integer, got {json}"))
}

fn expect_f64(json: &Json) -> Result<f64> {
    json.as_f64()
        .ok_or_else(|| anyhow!("Expected a number, got {json}"))
}
