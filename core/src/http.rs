//! HTTP transport types and the transport boundary.
//!
//! # Design
//! `RestClient` turns a `Request` into an `HttpRequest` (plain data: method,
//! absolute URL, headers, body bytes) and hands it to a `Transport`. The
//! transport performs the blocking round-trip and returns an `HttpResponse`.
//! Keeping the wire description as data lets tests substitute a recording
//! transport and inspect exactly what would have been sent.

use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verb {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            "HEAD" => Ok(Verb::Head),
            other => Err(RestError::Shape(format!("unknown HTTP verb: {other}"))),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RestClient::build`. `url` is absolute and already carries the
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Verb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub follow_redirects: bool,
}

impl HttpRequest {
    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data, in the order the transport
/// received the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Blocking HTTP round-trip.
///
/// Implementations must return non-2xx replies as `Ok`; only failures that
/// prevent a reply from being received are errors.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RestError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RestError> {
        (**self).send(request)
    }
}
