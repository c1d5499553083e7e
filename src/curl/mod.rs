pub mod curl_parsers;
pub mod normalize;
pub mod parser;

use std::{collections::HashMap, path::Path};

use http::{HeaderName, HeaderValue, header::COOKIE};
use log::debug;
use serde::Serialize;

use crate::{
    error::Result,
    transport::{DEFAULT_TIMEOUT, HttpBackend, ReqwestBackend},
};

/// An HTTP request described by a curl command.
///
/// `headers` never holds a `Cookie` entry: cookie headers are split into
/// `cookies` while parsing. An empty `body` means no body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
    pub body: String,
}

impl Request {
    /// Parse a curl command such as `curl -X POST 'https://..' -H 'A: b'`.
    pub fn parse(command: &str) -> Result<Self> {
        curl_parsers::curl_cmd_parse(command)
    }

    /// Read a whole file and parse its content as a curl command.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let command = std::fs::read_to_string(path.as_ref())?;
        debug!("read curl command from {}", path.as_ref().display());
        Self::parse(&command)
    }

    /// The `Cookie` header value for this request, pairs sorted by name.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let mut pairs: Vec<_> = self.cookies.iter().collect();
        pairs.sort();
        Some(
            pairs
                .into_iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Pretty-printed JSON form of the request.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the transport-level request.
    ///
    /// Headers are applied in name order and replace any value already set
    /// under the same (case-insensitive) name, so the last name in sort order
    /// wins. Cookies are appended to the `Cookie` header.
    pub fn to_http_request(&self) -> Result<http::Request<String>> {
        let mut request = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.url.as_str())
            .body(self.body.clone())?;

        let mut pairs: Vec<_> = self.headers.iter().collect();
        pairs.sort();
        let headers = request.headers_mut();
        for (name, value) in pairs {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(http::Error::from)?;
            let value = HeaderValue::from_str(value).map_err(http::Error::from)?;
            headers.insert(name, value);
        }

        if let Some(cookies) = self.cookie_header() {
            let cookie = match headers.get(COOKIE).and_then(|v| v.to_str().ok()) {
                Some(existing) if !existing.is_empty() => format!("{existing}; {cookies}"),
                _ => cookies,
            };
            let value = HeaderValue::from_str(&cookie).map_err(http::Error::from)?;
            headers.insert(COOKIE, value);
        }

        Ok(request)
    }

    /// Send the request with the default reqwest backend and return the raw
    /// response body. The status code is not checked.
    pub fn execute(&self) -> Result<Vec<u8>> {
        let backend = ReqwestBackend::new(DEFAULT_TIMEOUT)?;
        self.execute_with(&backend)
    }

    pub fn execute_with<B: HttpBackend>(&self, backend: &B) -> Result<Vec<u8>> {
        let request = self.to_http_request()?;
        debug!("sending {} {}", request.method(), request.uri());
        backend.send(request)
    }
}
