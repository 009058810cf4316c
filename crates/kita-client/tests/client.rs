//! Integration tests for the HTTP client.
//!
//! Round trips run against a one-shot server on a loopback port that answers
//! a canned response and hands back the raw request it received.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use kita_client::{ClientConfig, ClientError, HttpImportService, ParseBody};
use kita_import::{ImportService, ServiceError};
use kita_model::Separator;

/// Raw request as seen by the server.
struct Received {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

/// Serves one response and returns the base URL plus a handle to the request.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut headers = Vec::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap();
            }
            headers.push(line);
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        Received {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(body).unwrap(),
        }
    });
    (base_url, handle)
}

fn service_at(base_url: &str) -> HttpImportService {
    let config = ClientConfig::new(base_url)
        .with_timeout(Duration::from_secs(5))
        .with_token(Some("secret".to_string()));
    HttpImportService::new(config).unwrap()
}

#[test]
fn parse_body_is_base64_camel_case() {
    let body = ParseBody::new("kinder.csv", b"Nr;Vorname");
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "fileName": "kinder.csv", "fileContent": "TnI7Vm9ybmFtZQ==" })
    );
}

#[test]
fn service_keeps_configuration() {
    let config = ClientConfig::new("http://localhost:3000/api")
        .with_timeout(Duration::from_secs(5))
        .with_token(Some("secret".to_string()));
    let service = HttpImportService::new(config.clone()).unwrap();
    assert_eq!(service.config(), &config);
}

#[test]
fn invalid_base_url_is_rejected_before_any_request() {
    let err = HttpImportService::new(ClientConfig::new("localhost:3000")).err();
    assert_eq!(
        err,
        Some(ClientError::InvalidBaseUrl("localhost:3000".to_string()))
    );
}

#[test]
fn parse_round_trip_decodes_the_answer() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"headers":["Nr","Vorname"],"detectedSeparator":";","sampleRows":[["1","Mia"]],"totalRows":1}"#,
    );
    let service = service_at(&base_url);

    let parsed = service.parse("kinder.csv", b"Nr;Vorname\n1;Mia\n").unwrap();
    assert_eq!(parsed.headers, vec!["Nr", "Vorname"]);
    assert_eq!(parsed.detected_separator, Separator::Semicolon);
    assert_eq!(parsed.total_rows, 1);

    let received = server.join().unwrap();
    assert_eq!(
        received.request_line,
        "POST /api/children/import/parse HTTP/1.1"
    );
    assert!(
        received
            .headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case("authorization: Bearer secret"))
    );
    let body: serde_json::Value = serde_json::from_str(&received.body).unwrap();
    assert_eq!(body["fileName"], "kinder.csv");
    assert_eq!(body["fileContent"], "TnI7Vm9ybmFtZQoxO01pYQo=");
}

#[test]
fn error_status_carries_the_backend_message() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        r#"{"error":"Nur CSV-Dateien werden unterstützt"}"#,
    );
    let service = service_at(&base_url);

    let err = service.parse("kinder.xlsx", &[0x50, 0x4B]).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Server {
            status: 400,
            message: "Nur CSV-Dateien werden unterstützt".to_string(),
        }
    );
    server.join().unwrap();
}

#[test]
fn error_status_without_json_falls_back_to_reason() {
    let (base_url, server) = serve_once("503 Service Unavailable", "");
    let service = service_at(&base_url);

    let err = service.parse_file("kinder.csv", b"Nr").unwrap_err();
    assert_eq!(
        err,
        ClientError::Server {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
    );
    server.join().unwrap();
}

#[test]
fn malformed_success_body_is_an_invalid_response() {
    let (base_url, server) = serve_once("200 OK", "<html>Wartung</html>");
    let service = service_at(&base_url);

    let err = service.parse("kinder.csv", b"Nr").unwrap_err();
    assert!(matches!(err, ServiceError::InvalidResponse(_)));
    server.join().unwrap();
}
