use anyhow::Context;
use clap::Subcommand;
use tracing::{debug, info};
use tuplex_codec::TupleType;

use crate::json;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encode a JSON array of values into the tuple wire format
    Encode {
        #[arg(short, long = "type", env = "TUPLEX_TYPE")]
        /// The tuple type the values are bound to, for example {n}
        /// `tuple<ascii, int, boolean>`.
        tuple_type: TupleType,
        /// A JSON array holding one value per component, `null` for absent
        /// components.
        values: String,
    },
    /// Decode hex encoded wire bytes against a tuple type
    Decode {
        #[arg(short, long = "type", env = "TUPLEX_TYPE")]
        /// The declared tuple type to read the bytes as.
        ///
        /// Bytes written by a narrower type sharing a prefix with this one
        /// decode with the missing trailing components set to null.
        tuple_type: TupleType,
        /// The encoded tuple as hex, optionally prefixed with `0x`.
        hex: String,
        #[arg(long)]
        /// Print the decoded components as a JSON array rather than a
        /// tuple literal.
        json: bool,
    },
    /// Render a JSON array of values as a tuple literal
    Format {
        #[arg(short, long = "type", env = "TUPLEX_TYPE")]
        /// The tuple type the values are bound to.
        tuple_type: TupleType,
        /// A JSON array holding one value per component.
        values: String,
    },
}

impl Commands {
    /// Logs which command is about to run along with its tuple type.
    pub fn display_startup_message(&self) {
        match self {
            Commands::Encode { tuple_type, .. } => {
                info!(tuple_type = %tuple_type, "Encoding tuple value");
            },
            Commands::Decode { tuple_type, .. } => {
                info!(tuple_type = %tuple_type, "Decoding tuple value");
            },
            Commands::Format { tuple_type, .. } => {
                info!(tuple_type = %tuple_type, "Formatting tuple value");
            },
        }
    }

    /// Executes the command, returning the text to print.
    pub fn execute(self) -> anyhow::Result<String> {
        match self {
            Commands::Encode { tuple_type, values } => {
                let values = json::parse_values(&tuple_type, &values)?;
                let value = tuple_type
                    .new_value_from(values)
                    .context("Build tuple value")?;
                let encoded = value.encode();
                debug!(num_bytes = encoded.len(), "Encoded tuple");
                Ok(hex::encode(encoded))
            },
            Commands::Decode {
                tuple_type,
                hex,
                json,
            } => {
                let trimmed = hex.trim();
                let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);
                let bytes = hex::decode(hex_str).context("Parse hex input")?;
                let value = tuple_type.decode(&bytes).context("Decode tuple")?;

                if json {
                    let components = value
                        .values()
                        .map(|component| component.map(json::to_json))
                        .collect::<Result<Vec<_>, _>>()
                        .context("Read tuple components")?;
                    return Ok(serde_json::Value::Array(components).to_string());
                }

                value.format().context("Format tuple")
            },
            Commands::Format { tuple_type, values } => {
                let values = json::parse_values(&tuple_type, &values)?;
                let value = tuple_type
                    .new_value_from(values)
                    .context("Build tuple value")?;
                value.format().context("Format tuple")
            },
        }
    }
}
