//! Client configuration.
//!
//! The redirect policy and the body charset are fields of `ClientConfig`,
//! owned by each `RestClient`. Changing them on one client never affects
//! another.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::RestError;

/// Environment variable that supplies the base URI.
pub const BASE_URI_VAR: &str = "env";

/// Character encoding used for request bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Charset {
    #[default]
    Utf8,
    Iso8859_1,
    UsAscii,
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Encode `text` in this charset. Characters outside a single-byte
    /// charset's range become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let limit = match self {
            Charset::Utf8 => return text.as_bytes().to_vec(),
            Charset::Iso8859_1 => 0xFF,
            Charset::UsAscii => 0x7F,
        };
        text.chars()
            .map(|c| if (c as u32) <= limit { c as u32 as u8 } else { b'?' })
            .collect()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "ISO-8859-1" | "ISO8859-1" | "ISO_8859_1" | "LATIN1" => Ok(Charset::Iso8859_1),
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            _ => Err(RestError::Encoding(format!("unsupported charset: {s}"))),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = RestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Settings shared by every call made through one `RestClient`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every request URL, e.g. `https://api.example.com`.
    pub base_uri: String,
    pub follow_redirects: bool,
    pub default_charset: Charset,
}

impl ClientConfig {
    pub fn new(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.to_string(),
            ..Self::default()
        }
    }

    /// Configuration whose base URI comes from the `env` variable. A missing
    /// variable leaves the base URI empty.
    pub fn from_env() -> Self {
        Self::new(&std::env::var(BASE_URI_VAR).unwrap_or_default())
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_default_charset(mut self, charset: Charset) -> Self {
        self.default_charset = charset;
        self
    }
}
