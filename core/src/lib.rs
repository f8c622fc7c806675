//! Helpers for REST API test automation.
//!
//! # Overview
//! Build a `Request`, send it with one of `RestClient`'s verb methods and
//! inspect the captured `Response`. `json_utils` offers the JSON and
//! URL-encoding helpers test scenarios reach for: key lookup, schema
//! validation, fixture profiles, percent-encoding and pretty printing.
//!
//! # Design
//! - `RestClient` owns its `ClientConfig` (base URI, redirect policy, body
//!   charset); there is no process-wide state.
//! - Sending is split into `RestClient::build` (pure, produces an
//!   `HttpRequest`) and a blocking `Transport` round-trip. `UreqTransport`
//!   is the default; tests can plug in their own.
//! - Status codes are data. Only transport, parse, encoding and fixture
//!   failures are `RestError`s.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod json_utils;
pub mod logging;
pub mod request;
pub mod resources;
pub mod response;
pub mod transport;

pub use client::RestClient;
pub use config::{Charset, ClientConfig};
pub use error::{ErrorKind, RestError};
pub use http::{HttpRequest, HttpResponse, Transport, Verb};
pub use request::{ParamValue, Request};
pub use resources::{FixtureDir, Resources};
pub use response::Response;
pub use transport::UreqTransport;
