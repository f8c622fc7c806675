//! Blocking `Transport` backed by `ureq`.

use ureq::{Agent, RequestBuilder};

use crate::error::RestError;
use crate::http::{HttpRequest, HttpResponse, Transport, Verb};

/// Redirect limit used when a request opts into following redirects.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Executes `HttpRequest`s with a fresh `ureq` agent per call.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data. With `follow_redirects` off the agent
/// returns the 3xx reply itself instead of chasing `Location`.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(follow_redirects: bool) -> Agent {
        let max_redirects = if follow_redirects { DEFAULT_MAX_REDIRECTS } else { 0 };
        Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(max_redirects)
            .max_redirects_will_error(false)
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RestError> {
        let agent = Self::agent(request.follow_redirects);
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let mut response = match request.method {
            Verb::Get => with_headers(agent.get(url), &request.headers).call(),
            Verb::Delete => with_headers(agent.delete(url), &request.headers).call(),
            Verb::Head => with_headers(agent.head(url), &request.headers).call(),
            Verb::Post => {
                let builder = with_headers(agent.post(url), &request.headers);
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
            Verb::Put => {
                let builder = with_headers(agent.put(url), &request.headers);
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = match request.method {
            Verb::Head => String::new(),
            _ => response.body_mut().read_to_string()?,
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
