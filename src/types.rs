use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt;

/// Device identifier
///
/// Bulbs advertise their id as a `0x`-prefixed hex string. The value is kept
/// at full precision and goes on the wire as a bare decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(BigUint);

impl DeviceId {
    /// Parse a hex string without prefix
    ///
    /// Returns `None` for an empty string or any non-hex character.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        BigUint::parse_bytes(hex.as_bytes(), 16).map(Self)
    }

    /// Get the numeric value
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for DeviceId {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for DeviceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.to_str_radix(10)).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// 24-bit color, no alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Decode a packed `0xRRGGBB` value. Bits above 23 are ignored.
    pub fn from_packed(value: i64) -> Self {
        Self {
            red: ((value >> 16) & 0xFF) as u8,
            green: ((value >> 8) & 0xFF) as u8,
            blue: (value & 0xFF) as u8,
        }
    }

    /// Pack back into `0xRRGGBB`
    pub fn packed(&self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }
}

/// Raw discovery answer: a location URL plus string headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advertisement {
    pub location: String,
    pub headers: BTreeMap<String, String>,
}

impl Advertisement {
    /// Create an advertisement with no headers
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Look up a header, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decode an HTTP-style search response datagram
    ///
    /// Returns `None` unless the status line is `HTTP/1.1 200` and a
    /// `Location` header is present.
    pub fn parse_response(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let status = lines.next()?.trim();
        if !status.starts_with("HTTP/1.1 200") {
            return None;
        }

        let mut headers = BTreeMap::new();
        for line in lines {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        let location = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("location"))
            .map(|(_, value)| value.clone())?;

        Some(Self { location, headers })
    }
}
