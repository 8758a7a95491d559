use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Raised when a string is not a strict `#rrggbb` colour.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{value}' is not a 6-digit hex colour")]
pub struct InvalidColor {
    pub value: String,
}

/// A validated `#rrggbb` colour, always stored lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 7]);

impl HexColor {
    /// Build a colour from its channels.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        Self([
            b'#',
            DIGITS[(red >> 4) as usize],
            DIGITS[(red & 0x0f) as usize],
            DIGITS[(green >> 4) as usize],
            DIGITS[(green & 0x0f) as usize],
            DIGITS[(blue >> 4) as usize],
            DIGITS[(blue & 0x0f) as usize],
        ])
    }

    /// Parse a strict `#rrggbb` value. Case is normalised; nothing else is
    /// forgiven.
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        let bytes = value.as_bytes();
        let valid = bytes.len() == 7
            && bytes[0] == b'#'
            && bytes[1..].iter().all(|byte| byte.is_ascii_hexdigit());
        if !valid {
            return Err(InvalidColor {
                value: value.to_string(),
            });
        }

        let mut normalized = [0u8; 7];
        for (slot, byte) in normalized.iter_mut().zip(bytes) {
            *slot = byte.to_ascii_lowercase();
        }
        Ok(Self(normalized))
    }

    /// Parse user-typed input: surrounding whitespace is trimmed and a
    /// missing leading `#` is supplied before the strict check runs.
    pub fn parse_lenient(value: &str) -> Result<Self, InvalidColor> {
        let trimmed = value.trim();
        if trimmed.starts_with('#') {
            Self::parse(trimmed)
        } else {
            Self::parse(&format!("#{trimmed}"))
        }
    }

    /// The lower-case `#rrggbb` form.
    pub fn as_str(&self) -> &str {
        // Only ASCII hex digits and '#' are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("#000000")
    }

    /// Upper-case form used by labels, e.g. `#D3D3D3`.
    pub fn to_display(&self) -> String {
        self.as_str().to_ascii_uppercase()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HexColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
