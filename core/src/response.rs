//! Immutable result of one HTTP exchange.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::RestError;
use crate::http::HttpResponse;
use crate::json_utils::{pretty_print_json, pretty_print_map};
use crate::request::JSON_CONTENT_TYPE;

/// Status code, body and headers captured from a completed exchange.
///
/// Repeated header names are flattened: the last value wins, comparing
/// names without regard to ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    body: String,
    headers: BTreeMap<String, String>,
}

impl Response {
    pub fn new<I, K, V>(status_code: u16, body: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut flattened: BTreeMap<String, String> = BTreeMap::new();
        for (name, value) in headers {
            let name = name.into();
            flattened.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            flattened.insert(name, value.into());
        }
        Self {
            status_code,
            body: body.into(),
            headers: flattened,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Deserialize the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RestError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    fn is_json(&self) -> bool {
        self.header("Content-Type") == Some(JSON_CONTENT_TYPE)
    }
}

impl From<HttpResponse> for Response {
    fn from(response: HttpResponse) -> Self {
        Response::new(response.status, response.body, response.headers)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = if self.is_json() {
            pretty_print_json(&self.body).unwrap_or_else(|_| self.body.clone())
        } else {
            self.body.clone()
        };
        writeln!(f, "----Response----")?;
        writeln!(f, "Status code: {}", self.status_code)?;
        writeln!(f, "Headers:{}", pretty_print_map(&self.headers))?;
        writeln!(f, "Body:\n{body}\n")?;
        write!(f, "-------------------------------------------------------------")
    }
}
