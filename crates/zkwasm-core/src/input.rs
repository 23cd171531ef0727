//! Typed program inputs and the `value:tag` input list format.
//!
//! A proving task receives its public and private inputs as an ordered list of tokens. Each
//! token is a string `<value>:<tag>` where the tag tells the WASM runtime how to unpack the
//! value:
//!
//! | tag            | value                 | decoded as                                  |
//! |----------------|-----------------------|---------------------------------------------|
//! | `i64`          | decimal or `0x` hex   | one `u64`                                   |
//! | `bytes`        | `0x` hex              | one `u64` per byte                          |
//! | `bytes-packed` | `0x` hex              | one `u64` per little-endian 8-byte word     |
//!
//! Encoding a [`InputValue::Bytes`] and decoding the resulting token does not give the
//! original buffer back as a single value: the decoder unpacks it one byte per element.

use std::{fmt, str::FromStr};

use alloy_primitives::hex;

use crate::error::{Error, Result};

/// A typed input value for a WASM program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 64-bit integer, sent with the `i64` tag.
    U64(u64),
    /// An untyped number. Only numbers that fit a signed 64-bit integer are encodable.
    Number(serde_json::Number),
    /// A raw byte buffer.
    Bytes(Vec<u8>),
    /// An array of 64-bit words packed little-endian.
    PackedU64(Vec<u64>),
}

impl From<i64> for InputValue {
    fn from(v: i64) -> Self {
        InputValue::I64(v)
    }
}

impl From<u64> for InputValue {
    fn from(v: u64) -> Self {
        InputValue::U64(v)
    }
}

impl From<Vec<u8>> for InputValue {
    fn from(v: Vec<u8>) -> Self {
        InputValue::Bytes(v)
    }
}

impl From<Vec<u64>> for InputValue {
    fn from(v: Vec<u64>) -> Self {
        InputValue::PackedU64(v)
    }
}

impl TryFrom<serde_json::Value> for InputValue {
    type Error = Error;

    /// Maps JSON numbers to [`InputValue::Number`], `0x` strings to [`InputValue::Bytes`] and
    /// arrays of unsigned integers to [`InputValue::PackedU64`].
    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => Ok(InputValue::Number(n)),
            serde_json::Value::String(s) => {
                s.strip_prefix("0x")
                    .and_then(decode_hex_digits)
                    .map(InputValue::Bytes)
                    .ok_or(Error::UnsupportedInputType)
            }
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().ok_or(Error::UnsupportedInputType))
                .collect::<Result<Vec<_>>>()
                .map(InputValue::PackedU64),
            _ => Err(Error::UnsupportedInputType),
        }
    }
}

/// Tag of an input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTag {
    /// `i64`
    I64,
    /// `bytes`
    Bytes,
    /// `bytes-packed`
    BytesPacked,
}

impl InputTag {
    /// Returns the tag as it appears after the colon.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputTag::I64 => "i64",
            InputTag::Bytes => "bytes",
            InputTag::BytesPacked => "bytes-packed",
        }
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputTag {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "i64" => Ok(InputTag::I64),
            "bytes" => Ok(InputTag::Bytes),
            "bytes-packed" => Ok(InputTag::BytesPacked),
            _ => Err(()),
        }
    }
}

impl InputValue {
    /// Encodes this value into a single `value:tag` token.
    pub fn encode(&self) -> Result<String> {
        Ok(match self {
            InputValue::I64(v) => format!("{v}:{}", InputTag::I64),
            InputValue::U64(v) => format!("{v}:{}", InputTag::I64),
            InputValue::Number(n) => {
                let v = n.as_i64().ok_or(Error::UnsupportedInputType)?;
                format!("{v}:{}", InputTag::I64)
            }
            InputValue::Bytes(bytes) => format!("0x{}:{}", hex::encode(bytes), InputTag::Bytes),
            InputValue::PackedU64(words) => {
                let packed: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
                format!("0x{}:{}", hex::encode(packed), InputTag::BytesPacked)
            }
        })
    }
}

/// Encodes `values` into an input list, preserving order.
///
/// Fails with [`Error::UnsupportedInputType`] on the first value that cannot be encoded; no
/// partial list is returned.
pub fn encode_values(values: &[InputValue]) -> Result<Vec<String>> {
    values.iter().map(InputValue::encode).collect()
}

/// Decodes an input list into the flat sequence of words the WASM runtime reads.
///
/// Fails with [`Error::MalformedToken`] carrying the first token that does not parse.
pub fn decode_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u64>> {
    let mut words = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        decode_token(token, &mut words).ok_or_else(|| Error::MalformedToken(token.to_string()))?;
    }
    Ok(words)
}

fn decode_token(token: &str, out: &mut Vec<u64>) -> Option<()> {
    let (value, tag) = token.split_once(':')?;

    match tag.parse::<InputTag>().ok()? {
        InputTag::I64 => {
            let word = match value.strip_prefix("0x") {
                Some(digits) => parse_hex_u64(digits)?,
                None => parse_decimal_u64(value)?,
            };
            out.push(word);
        }
        InputTag::Bytes => {
            let bytes = decode_hex_digits(value.strip_prefix("0x")?)?;
            out.extend(bytes.into_iter().map(u64::from));
        }
        InputTag::BytesPacked => {
            let bytes = decode_hex_digits(value.strip_prefix("0x")?)?;
            if bytes.len() % 8 != 0 {
                return None;
            }
            out.extend(bytes.chunks_exact(8).map(|word| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(word);
                u64::from_le_bytes(buf)
            }));
        }
    }

    Some(())
}

/// Even-length hex digits with the `0x` prefix already removed. A second prefix is rejected.
fn decode_hex_digits(digits: &str) -> Option<Vec<u8>> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    hex::decode(digits).ok()
}

/// Hex quantity without leading zero digits, at most 64 bits.
fn parse_hex_u64(digits: &str) -> Option<u64> {
    if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

fn parse_decimal_u64(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
