use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use toolport_core::Error;
use toolport_core::verify::Verifier;

/// Serve one HTTP response on a local port; the handle yields the raw request.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/details", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (endpoint, handle)
}

#[tokio::test]
async fn verify_returns_server_details() {
    let body = r#"{
        "server_id": "0f1234de",
        "endpoint": "https://host/tool0f1234de",
        "mcp_endpoint": "https://host/tool0f1234de/sse",
        "server_type": "sse",
        "supported_agents": ["SearchAgent", "WeatherAgent"]
    }"#;
    let (endpoint, server) = serve_once("200 OK", body);
    let verifier = Verifier::new(endpoint).unwrap();

    let details = verifier.verify("0f1234de", "secret-key").await.unwrap();

    assert_eq!(details.server_id, "0f1234de");
    assert_eq!(details.mcp_endpoint, "https://host/tool0f1234de/sse");
    assert_eq!(details.supported_agents, vec!["SearchAgent", "WeatherAgent"]);

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /details/0f1234de "));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("authorization: bearer secret-key")
    );
}

#[tokio::test]
async fn not_found_is_invalid_tool_id() {
    let (endpoint, server) = serve_once("404 Not Found", "{}");
    let verifier = Verifier::new(endpoint).unwrap();

    let err = verifier.verify("deadbeef", "key").await.unwrap_err();

    assert!(matches!(err, Error::InvalidToolId { tool_id } if tool_id == "deadbeef"));
    server.join().unwrap();
}

#[tokio::test]
async fn other_status_is_verification_failure() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "{}");
    let verifier = Verifier::new(endpoint).unwrap();

    let err = verifier.verify("deadbeef", "key").await.unwrap_err();

    assert!(matches!(err, Error::VerificationFailed { .. }));
    assert_eq!(
        err.to_string(),
        "Server verification failed: Internal Server Error"
    );
    server.join().unwrap();
}

#[tokio::test]
async fn malformed_body_is_http_error() {
    let (endpoint, server) = serve_once("200 OK", "not json");
    let verifier = Verifier::new(endpoint).unwrap();

    let err = verifier.verify("deadbeef", "key").await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    server.join().unwrap();
}
