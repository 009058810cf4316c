//! HTTP implementation of the import service.
//!
//! All three operations are JSON `POST`s below `{base}/children/import/`.
//! Error responses carry `{"error": "..."}`; that text becomes the message
//! shown to the user.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use kita_import::{ImportService, ServiceError};
use kita_model::{ExecuteRequest, ExecuteResult, ParsedFile, PreviewRequest, PreviewResponse};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const CLIENT_NAME: &str = "kita-import";

/// Body of the parse call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseBody<'a> {
    pub file_name: &'a str,
    /// Base64 of the raw file.
    pub file_content: String,
}

impl<'a> ParseBody<'a> {
    pub fn new(file_name: &'a str, bytes: &[u8]) -> Self {
        Self {
            file_name,
            file_content: BASE64.encode(bytes),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Message of an error response body: the `error` field if the body is
/// the backend's JSON error, otherwise the trimmed text.
pub fn error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return Some(parsed.error);
    }
    let text = body.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R> {
    serde_json::from_str(body).map_err(|e| ClientError::JsonParse(e.to_string()))
}

fn read_response<R: DeserializeOwned>(response: Response) -> Result<R> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        return Err(ClientError::Server {
            status: status.as_u16(),
            message,
        });
    }
    decode_body(&body)
}

/// Blocking client for the import endpoints.
pub struct HttpImportService {
    client: Client,
    config: ClientConfig,
}

impl HttpImportService {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn post<B, R>(&self, operation: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(operation);
        debug!(%url, "sending import request");

        let mut request = self
            .client
            .post(&url)
            .header(
                USER_AGENT,
                format!("{CLIENT_NAME}/{}", env!("CARGO_PKG_VERSION")),
            )
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        debug!(%url, status = response.status().as_u16(), "import response");
        read_response(response)
    }

    pub fn parse_file(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedFile> {
        self.post("parse", &ParseBody::new(file_name, bytes))
    }

    pub fn preview_rows(&self, request: &PreviewRequest) -> Result<PreviewResponse> {
        self.post("preview", request)
    }

    pub fn execute_rows(&self, request: &ExecuteRequest) -> Result<ExecuteResult> {
        self.post("execute", request)
    }
}

impl ImportService for HttpImportService {
    fn parse(&self, file_name: &str, bytes: &[u8]) -> std::result::Result<ParsedFile, ServiceError> {
        Ok(self.parse_file(file_name, bytes)?)
    }

    fn preview(&self, request: &PreviewRequest) -> std::result::Result<PreviewResponse, ServiceError> {
        Ok(self.preview_rows(request)?)
    }

    fn execute(&self, request: &ExecuteRequest) -> std::result::Result<ExecuteResult, ServiceError> {
        Ok(self.execute_rows(request)?)
    }
}
