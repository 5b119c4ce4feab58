//! Payload file reading and writing.
//!
//! Payloads are stored either as a JSON array of byte values (`[0, 0, 71, ...]`)
//! or as hex text with an optional `0x` prefix.

use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Hex,
}

impl PayloadFormat {
    /// `.json` files are JSON, everything else is hex.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PayloadFormat::Json,
            _ => PayloadFormat::Hex,
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadFormat::Json => write!(f, "json"),
            PayloadFormat::Hex => write!(f, "hex"),
        }
    }
}

impl FromStr for PayloadFormat {
    type Err = PayloadFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(PayloadFormat::Json),
            "hex" => Ok(PayloadFormat::Hex),
            other => Err(PayloadFileError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum PayloadFileError {
    #[error("Failed to access payload file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload file is not a JSON array of bytes: {0}")]
    InvalidJson(String),

    #[error("Payload file is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Payload file is empty")]
    Empty,

    #[error("Unknown payload format '{0}'. Expected 'json' or 'hex'")]
    UnknownFormat(String),
}

/// Renders `payload` in `format`.
pub fn format_payload(payload: &[u8], format: PayloadFormat) -> String {
    match format {
        PayloadFormat::Json => {
            let values: Vec<String> = payload.iter().map(|b| b.to_string()).collect();
            format!("[{}]", values.join(","))
        }
        PayloadFormat::Hex => hex::encode(payload),
    }
}

/// Parses payload text in `format`.
pub fn parse_payload(content: &str, format: PayloadFormat) -> Result<Vec<u8>, PayloadFileError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(PayloadFileError::Empty);
    }

    match format {
        PayloadFormat::Json => parse_json_bytes(content),
        PayloadFormat::Hex => {
            let digits = content
                .strip_prefix("0x")
                .or_else(|| content.strip_prefix("0X"))
                .unwrap_or(content);
            let digits: String = digits.split_whitespace().collect();
            Ok(hex::decode(digits)?)
        }
    }
}

fn parse_json_bytes(content: &str) -> Result<Vec<u8>, PayloadFileError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| PayloadFileError::InvalidJson(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(PayloadFileError::InvalidJson("expected an array".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| {
                    PayloadFileError::InvalidJson(format!(
                        "element {} ({}) is not an integer in 0..=255",
                        i, item
                    ))
                })
        })
        .collect()
}

/// Writes `payload` to `path`, overwriting any existing file.
pub fn write_payload(
    path: &Path,
    payload: &[u8],
    format: PayloadFormat,
) -> Result<(), PayloadFileError> {
    std::fs::write(path, format_payload(payload, format)).map_err(|source| PayloadFileError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Reads a payload, choosing the format from the file extension.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, PayloadFileError> {
    read_payload_as(path, PayloadFormat::from_path(path))
}

pub fn read_payload_as(path: &Path, format: PayloadFormat) -> Result<Vec<u8>, PayloadFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| PayloadFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_payload(&content, format)
}
