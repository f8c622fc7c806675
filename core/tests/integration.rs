//! `RestClient` against the live echo server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every verb through
//! `RestClient` over real HTTP with the default ureq transport. The echo
//! body shows exactly what went over the wire.

use std::net::SocketAddr;

use mock_server::Echo;
use rest_core::json_utils::url_encoded_string_to_map;
use rest_core::logging::init_logger;
use rest_core::{ClientConfig, ErrorKind, Request, RestClient, Verb};

/// Bind the mock server on a random port in a background runtime.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> RestClient {
    let _ = init_logger(log::LevelFilter::Debug);
    RestClient::new(ClientConfig::new(&format!("http://{addr}")))
}

#[test]
fn get_sends_headers_query_and_path_params() {
    let client = client(start_server());

    let mut request = Request::generate("", "/echo/users/{id}")
        .with_path_param("id", "42")
        .with_query_param("q", "a&b")
        .with_query_param("page", "2");
    request.add_authorization("Bearer token-1");

    let response = client.get(&request).unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), Some("application/json"));

    let echo: Echo = response.json().unwrap();
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo/users/42");
    let query = url_encoded_string_to_map(echo.query.as_deref().unwrap());
    assert_eq!(query.get("q").map(String::as_str), Some("a&b"));
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(echo.headers.get("authorization").map(String::as_str), Some("Bearer token-1"));
    assert_eq!(echo.headers.get("x-client-id").map(String::as_str), Some("rms-ui"));
    assert!(echo.body.is_empty());
}

#[test]
fn post_payload_styles() {
    let client = client(start_server());

    // form params win over params and body
    let mut request = Request::generate(r#"{"raw":true}"#, "/echo/login")
        .with_form_param("user", "ann")
        .with_form_param("pass", "p w")
        .with_param("ignored", 1);
    request.content_type.clear();
    let echo: Echo = client.post(&request).unwrap().json().unwrap();
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "pass=p+w&user=ann");
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );

    // params win over body
    let request = Request::generate(r#"{"raw":true}"#, "/echo/token").with_param("grant", "a b");
    let echo: Echo = client.post(&request).unwrap().json().unwrap();
    assert_eq!(echo.body, "grant=a+b");

    // raw body
    let request = Request::generate(r#"{"raw":true}"#, "/echo/items");
    let echo: Echo = client.post(&request).unwrap().json().unwrap();
    assert_eq!(echo.body, r#"{"raw":true}"#);
    assert_eq!(
        echo.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn put_delete_and_head() {
    let client = client(start_server());

    let request = Request::generate(r#"{"title":"Updated"}"#, "/echo/items/{id}").with_path_param("id", "7");

    let echo: Echo = client.put(&request).unwrap().json().unwrap();
    assert_eq!(echo.method, "PUT");
    assert_eq!(echo.path, "/echo/items/7");
    assert_eq!(echo.body, r#"{"title":"Updated"}"#);

    let echo: Echo = client.delete(&request).unwrap().json().unwrap();
    assert_eq!(echo.method, "DELETE");
    assert!(echo.body.is_empty());

    let response = client.head(&request).unwrap();
    assert_eq!(response.status_code(), 200);
    assert!(response.body().is_empty());

    let echo: Echo = client.send(&request.clone().with_verb(Verb::Put)).unwrap().json().unwrap();
    assert_eq!(echo.method, "PUT");
}

#[test]
fn error_statuses_are_returned_not_raised() {
    let client = client(start_server());

    let response = client.get(&Request::new("/status/503")).unwrap();
    assert_eq!(response.status_code(), 503);
    assert_eq!(response.body(), "status 503");

    let response = client.get(&Request::new("/nowhere")).unwrap();
    assert_eq!(response.status_code(), 404);
}

#[test]
fn redirects_follow_client_policy() {
    let addr = start_server();

    let response = client(addr).get(&Request::new("/redirect")).unwrap();
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("Location"), Some("/echo?redirected=true"));

    let mut following = client(addr);
    following.set_follow_redirects(true);
    let response = following.get(&Request::new("/redirect")).unwrap();
    assert_eq!(response.status_code(), 200);
    let echo: Echo = response.json().unwrap();
    assert_eq!(echo.query.as_deref(), Some("redirected=true"));
}

#[test]
fn default_encoding_changes_body_bytes() {
    let mut client = client(start_server());
    client.set_default_encoding("US-ASCII").unwrap();

    let mut request = Request::new("/echo");
    request.body = "café".to_string();
    let echo: Echo = client.put(&request).unwrap().json().unwrap();
    assert_eq!(echo.body, "caf?");
}

#[test]
fn connection_failure_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let err = client(addr).get(&Request::new("/echo")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
