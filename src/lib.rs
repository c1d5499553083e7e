//! Turn a pasted `curl ...` command into a structured [`Request`] and,
//! optionally, send it.
//!
//! ```
//! use curlreq::parse_curl_command;
//!
//! let request = parse_curl_command(
//!     "curl -X POST 'http://x.test/a' \\\n  -H 'Content-Type: application/json' \\\n  --data '{\"k\":1}'",
//! )?;
//! assert_eq!(request.method, "POST");
//! assert_eq!(request.url, "http://x.test/a");
//! assert_eq!(request.body, r#"{"k":1}"#);
//! # Ok::<(), curlreq::Error>(())
//! ```

pub mod curl;
pub mod error;
pub mod transport;
#[cfg(test)]
mod test_util;

use std::path::Path;

pub use curl::{
    Request,
    curl_parsers::extract,
    normalize::normalize,
    parser::{parse_cookies, parse_cookies_into},
};
pub use error::{Error, Result};
pub use transport::{DEFAULT_TIMEOUT, HttpBackend, ReqwestBackend};

pub fn parse_curl_command(command: &str) -> Result<Request> {
    Request::parse(command)
}

pub fn parse_curl_command_file<P: AsRef<Path>>(path: P) -> Result<Request> {
    Request::parse_file(path)
}
