//! Dispatch of `Request`s through a `Transport`.
//!
//! # Design
//! `RestClient` holds a `ClientConfig` and a transport and carries no other
//! state between calls. Each verb is split into `build`, which produces the
//! `HttpRequest` without touching the network, and the transport round-trip
//! whose reply becomes a `Response`. Transport failures propagate unchanged;
//! status codes are returned verbatim for the caller to judge.

use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::config::{Charset, ClientConfig};
use crate::error::RestError;
use crate::http::{HttpRequest, Transport, Verb};
use crate::json_utils::map_to_url_encoded_string;
use crate::request::Request;
use crate::response::Response;
use crate::transport::UreqTransport;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Everything except RFC 3986 unreserved characters is escaped in path params.
const PATH_PARAM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Synchronous client that sends `Request`s and captures `Response`s.
#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl RestClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_follow_redirects(&mut self, follow: bool) {
        self.config.follow_redirects = follow;
    }

    /// Change the charset used for every subsequent request body.
    pub fn set_default_encoding(&mut self, charset: &str) -> Result<(), RestError> {
        info!("Setting default encoding to {charset}");
        self.config.default_charset = charset.parse::<Charset>()?;
        Ok(())
    }

    pub fn get(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(Verb::Get, request)
    }

    /// Send with POST.
    ///
    /// The payload is the form params when any are set, otherwise the
    /// URL-encoded `params` when any are set, otherwise the raw body.
    pub fn post(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(Verb::Post, request)
    }

    pub fn put(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(Verb::Put, request)
    }

    pub fn delete(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(Verb::Delete, request)
    }

    pub fn head(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(Verb::Head, request)
    }

    /// Send with the verb stored in `request.verb`.
    pub fn send(&self, request: &Request) -> Result<Response, RestError> {
        self.execute(request.verb, request)
    }

    /// Describe the wire request for `verb` without sending it.
    pub fn build(&self, verb: Verb, request: &Request) -> Result<HttpRequest, RestError> {
        let url = self.url(request)?;

        let (body, default_content_type) = match verb {
            Verb::Post if !request.form_params.is_empty() => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&request.form_params)
                    .finish();
                (Some(encoded), Some(FORM_CONTENT_TYPE))
            }
            Verb::Post if !request.params.is_empty() => {
                (Some(map_to_url_encoded_string(&request.params)), None)
            }
            Verb::Post | Verb::Put => (Some(request.body.clone()), None),
            Verb::Get | Verb::Delete | Verb::Head => (None, None),
        };

        let mut headers = Vec::with_capacity(request.headers.len() + 1);
        let content_type = match request.content_type.as_str() {
            "" => default_content_type,
            set => Some(set),
        };
        let has_explicit = request
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE));
        if let (Some(content_type), false) = (content_type, has_explicit) {
            headers.push((CONTENT_TYPE.to_string(), content_type.to_string()));
        }
        headers.extend(
            request
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        Ok(HttpRequest {
            method: verb,
            url: url.into(),
            headers,
            body: body.map(|text| self.config.default_charset.encode(&text)),
            follow_redirects: self.config.follow_redirects,
        })
    }

    fn execute(&self, verb: Verb, request: &Request) -> Result<Response, RestError> {
        info!("Sending {verb} request {request}");
        let http_request = self.build(verb, request)?;
        debug!("{} {}", http_request.method, http_request.url);

        let response = Response::from(self.transport.send(&http_request)?);
        info!("Received response {response}");
        Ok(response)
    }

    /// Base URI, version and path joined, `{name}` placeholders filled from
    /// the path params, then query params appended.
    fn url(&self, request: &Request) -> Result<Url, RestError> {
        let mut target = format!("{}{}", request.version, request.path);
        for (name, value) in &request.path_params {
            let encoded = utf8_percent_encode(value, PATH_PARAM).to_string();
            target = target.replace(&format!("{{{name}}}"), &encoded);
        }

        let base = self.config.base_uri.trim_end_matches('/');
        let joined = if base.is_empty() || target.is_empty() || target.starts_with('/') {
            format!("{base}{target}")
        } else {
            format!("{base}/{target}")
        };

        let mut url = Url::parse(&joined)?;
        if !request.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query_params {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}
