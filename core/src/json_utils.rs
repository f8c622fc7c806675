//! Stateless JSON and URL-encoding helpers for test scenarios.
//!
//! Lookups and edits operate on the top level of object-shaped documents.
//! Percent-encoding follows `application/x-www-form-urlencoded`: spaces
//! become `+` and everything but `A-Z a-z 0-9 * - . _` is escaped.

use std::collections::BTreeMap;
use std::fmt::Display;

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use url::{form_urlencoded, Url};

use crate::config::BASE_URI_VAR;
use crate::error::RestError;
use crate::request::ParamValue;
use crate::resources::Resources;

const ORIGIN: &str = "rest_core::json_utils";

// ---------------------------------------------------------------------------
// Schema validation and key lookup
// ---------------------------------------------------------------------------

/// Validate `json_data` against `json_schema`.
///
/// Returns `Ok(false)` when the document does not satisfy the schema. Either
/// document failing to parse, or the schema failing to compile, is an error.
pub fn validate_json_schema(json_data: &str, json_schema: &str) -> Result<bool, RestError> {
    let schema: Value = serde_json::from_str(json_schema)?;
    let instance: Value = serde_json::from_str(json_data)?;

    let validator =
        jsonschema::validator_for(&schema).map_err(|e| RestError::Schema(e.to_string()))?;

    let mut valid = true;
    for error in validator.iter_errors(&instance) {
        log::debug!("schema violation at {}: {}", error.instance_path, error);
        valid = false;
    }
    Ok(valid)
}

/// Textual value of a top-level key, or `None` if the key is absent.
///
/// Strings are returned unquoted, numbers and booleans as their literal
/// text, `null` as `"null"` and containers as an empty string.
pub fn get_value_of_key_from_json(key: &str, json: &str) -> Result<Option<String>, RestError> {
    let object = parse_object(json)?;
    Ok(object.get(key).map(as_text))
}

/// Elements under the top-level `key`, in document order.
///
/// Arrays yield their elements and objects their field values. String
/// elements are returned unquoted, anything else as compact JSON. Scalars
/// yield an empty list. An absent or `null` key is an error.
pub fn get_array_value_of_key_from_json(key: &str, json: &str) -> Result<Vec<String>, RestError> {
    let object = parse_object(json)?;
    let elements: Vec<&Value> = match object.get(key) {
        None | Some(Value::Null) => {
            return Err(RestError::Shape(format!("no array under key {key:?}")));
        }
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(fields)) => fields.values().collect(),
        Some(_) => Vec::new(),
    };
    Ok(elements
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

/// `json` with the top-level `key` removed, as compact text.
pub fn remove_key_from_json(key: &str, json: &str) -> Result<String, RestError> {
    let mut object = parse_object(json)?;
    object.shift_remove(key);
    Ok(Value::Object(object).to_string())
}

fn parse_object(json: &str) -> Result<Map<String, Value>, RestError> {
    match serde_json::from_str(json)? {
        Value::Object(object) => Ok(object),
        other => Err(RestError::Shape(format!(
            "expected a JSON object, found {}",
            type_name(&other)
        ))),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Fixtures and profiles
// ---------------------------------------------------------------------------

/// Load a fixture and return it as compact JSON.
pub fn load_json(resources: &impl Resources, json_name: &str) -> Result<String, RestError> {
    let text = resources.read(json_name)?;
    let value: Value = serde_json::from_str(&text)?;
    Ok(value.to_string())
}

/// One named profile of a fixture, re-serialized as compact JSON.
///
/// A profile file maps profile names to documents:
/// `{"profile_name1": {...}, "profile_name2": {...}}`. A missing profile
/// yields `"null"`.
pub fn get_profile_from_json(
    resources: &impl Resources,
    json_name: &str,
    profile_name: &str,
) -> Result<String, RestError> {
    let profiles = parse_object(&load_json(resources, json_name)?)?;
    Ok(profiles.get(profile_name).unwrap_or(&Value::Null).to_string())
}

/// A profile flattened into a string map.
///
/// Scalars are stringified and `null` values are skipped; nested arrays or
/// objects, or a profile that is not an object, are errors.
pub fn load_map_from_resource(
    resources: &impl Resources,
    json_name: &str,
    profile_name: &str,
) -> Result<BTreeMap<String, String>, RestError> {
    let profile = get_profile_from_json(resources, json_name, profile_name)?;
    let object = parse_object(&profile)
        .map_err(|_| RestError::Shape(format!("profile {profile_name:?} in {json_name} is not an object")))?;

    let mut map = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                return Err(RestError::Shape(format!(
                    "profile {profile_name:?} has a nested value under {key:?}"
                )));
            }
            scalar => {
                map.insert(key, as_text(&scalar));
            }
        }
    }
    Ok(map)
}

/// Base URI from the `env` environment variable.
pub fn get_base_uri() -> Option<String> {
    std::env::var(BASE_URI_VAR).ok()
}

pub fn to_json_array(list: &[String]) -> Value {
    Value::Array(list.iter().cloned().map(Value::String).collect())
}

// ---------------------------------------------------------------------------
// URL encoding
// ---------------------------------------------------------------------------

pub fn encode_utf8(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Inverse of `encode_utf8`.
///
/// Fails when a `%` is not followed by two hex digits or when the escaped
/// bytes are not UTF-8.
pub fn decode_utf8(text: &str) -> Result<String, RestError> {
    if let Some(at) = malformed_escape(text) {
        return Err(
            RestError::Encoding(format!("{text:?} has a malformed escape at byte {at}")).report(ORIGIN),
        );
    }
    let plus_as_space = text.replace('+', " ");
    percent_decode_str(&plus_as_space)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RestError::Encoding(format!("{text:?} is not UTF-8 once decoded: {e}")).report(ORIGIN))
}

/// Byte offset of the first `%` not followed by two hex digits.
fn malformed_escape(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        let valid = b != b'%'
            || matches!(bytes.get(i + 1..i + 3), Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
        (!valid).then_some(i)
    })
}

/// `key1=value1&key2=value2`, encoding values but not keys.
///
/// An empty map yields an empty string.
pub fn map_to_url_encoded_string<K, V>(map: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Display,
    V: Display,
{
    map.into_iter()
        .map(|(key, value)| format!("{key}={}", encode_utf8(&value.to_string())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode `key=value&...` into a map. Repeated keys keep the last value.
pub fn url_encoded_string_to_map(pairs: &str) -> BTreeMap<String, String> {
    form_urlencoded::parse(pairs.as_bytes()).into_owned().collect()
}

/// Decode the query string of an absolute URL into a map.
pub fn url_query_params_to_map(url: &str) -> Result<BTreeMap<String, String>, RestError> {
    let url = Url::parse(url)?;
    Ok(url.query_pairs().into_owned().collect())
}

/// A copy of `map` with every key and value percent-encoded.
pub fn encode_map(map: &BTreeMap<String, ParamValue>) -> BTreeMap<String, String> {
    map.iter()
        .map(|(key, value)| (encode_utf8(key), encode_utf8(&value.to_string())))
        .collect()
}

// ---------------------------------------------------------------------------
// Pretty printing
// ---------------------------------------------------------------------------

/// One `\n  key:value` line per entry, or `none` for an empty map.
pub fn pretty_print_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> String
where
    K: Display,
    V: Display,
{
    let rendered: String = map
        .into_iter()
        .map(|(key, value)| format!("\n  {key}:{value}"))
        .collect();
    if rendered.is_empty() {
        "none".to_string()
    } else {
        rendered
    }
}

pub fn pretty_print_json(json: &str) -> Result<String, RestError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
