//! Mutable description of one API call.
//!
//! # Design
//! `Request` is plain data with public fields. Every mapping is an owned
//! `BTreeMap`, so a clone is fully independent of its source and rendered
//! logs list entries in a stable order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::Verb;
use crate::json_utils::{pretty_print_json, pretty_print_map};

pub const AUTHORIZATION: &str = "Authorization";
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";
pub const DEFAULT_CLIENT_ID: &str = "rms-ui";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Value stored in `Request::params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => f.write_str("null"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value.into())
    }
}

/// Non-finite floats have no JSON number form and become `Null`.
impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(ParamValue::Null, ParamValue::Number)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// One HTTP call as the caller describes it.
///
/// `version` is prepended to `path` when the URL is built. `params` is only
/// consulted by POST, and only when `form_params` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub path: String,
    pub verb: Verb,
    pub version: String,
    pub body: String,
    pub content_type: String,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    pub form_params: BTreeMap<String, String>,
    pub path_params: BTreeMap<String, String>,
    pub params: BTreeMap<String, ParamValue>,
}

impl Request {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    /// A JSON request carrying the default client identifier header.
    pub fn generate(body: &str, path: &str) -> Self {
        let mut request = Self::new(path);
        request
            .headers
            .insert(CLIENT_ID_HEADER.to_string(), DEFAULT_CLIENT_ID.to_string());
        request.content_type = JSON_CONTENT_TYPE.to_string();
        request.body = body.to_string();
        request
    }

    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verb = verb;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.query_params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_form_param(mut self, name: &str, value: &str) -> Self {
        self.form_params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn add_authorization(&mut self, token: &str) {
        self.headers.insert(AUTHORIZATION.to_string(), token.to_string());
    }

    pub fn delete_authorization(&mut self) {
        self.headers.remove(AUTHORIZATION);
    }

    /// Reset path, body and every mapping. Content type, version and verb
    /// are kept.
    pub fn clear(&mut self) {
        self.path.clear();
        self.body.clear();
        self.headers.clear();
        self.query_params.clear();
        self.form_params.clear();
        self.path_params.clear();
        self.params.clear();
    }

    fn is_json(&self) -> bool {
        self.content_type.contains(JSON_CONTENT_TYPE)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = if self.is_json() {
            pretty_print_json(&self.body).unwrap_or_else(|_| self.body.clone())
        } else {
            self.body.clone()
        };
        writeln!(f, "---- Request ----")?;
        writeln!(f, "Method(verb): {}", self.verb)?;
        writeln!(f, "Path:         {}", self.path)?;
        writeln!(f, "Content-Type: {}", self.content_type)?;
        writeln!(f, "Headers:      {}", pretty_print_map(&self.headers))?;
        writeln!(f, "Body:\n{body}")?;
        writeln!(f, "Params:       {}", pretty_print_map(&self.params))?;
        writeln!(f, "Path parameters:{}", pretty_print_map(&self.path_params))?;
        writeln!(f, "QueryParams:  {}", pretty_print_map(&self.query_params))?;
        writeln!(f, "Version:      {}", self.version)?;
        write!(f, "--------------------------------------------------------------")
    }
}
