use std::time::Duration;

use log::debug;

use crate::error::{Error, Result};

/// Timeout applied to the whole round trip when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can send an HTTP request and hand back the response body.
///
/// Parsing never needs a backend; tests plug in a recording mock, the CLI
/// uses [`ReqwestBackend`].
pub trait HttpBackend {
    fn send(&self, req: http::Request<String>) -> Result<Vec<u8>>;
}

impl<B: HttpBackend + ?Sized> HttpBackend for &B {
    fn send(&self, req: http::Request<String>) -> Result<Vec<u8>> {
        (**self).send(req)
    }
}

/// Blocking backend on top of `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::blocking::Client,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(Box::new(e)))?;
        Ok(Self { client })
    }
}

impl HttpBackend for ReqwestBackend {
    fn send(&self, req: http::Request<String>) -> Result<Vec<u8>> {
        let (parts, body) = req.into_parts();
        let response = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .map_err(|e| Error::Transport(Box::new(e)))?;

        debug!("response status {}", response.status());
        // `bytes` consumes the response, so the connection is released whether
        // or not the read succeeds.
        let body = response
            .bytes()
            .map_err(|e| Error::ResponseRead(Box::new(e)))?;
        debug!("read {} response bytes", body.len());
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use http::header::COOKIE;

    use super::*;
    use crate::curl::Request;

    struct MockBackend {
        last_request: Mutex<Option<http::Request<String>>>,
        response: Vec<u8>,
        fail: bool,
    }

    impl MockBackend {
        fn new(response: &[u8]) -> Self {
            Self {
                last_request: Mutex::new(None),
                response: response.to_vec(),
                fail: false,
            }
        }
    }

    impl HttpBackend for MockBackend {
        fn send(&self, req: http::Request<String>) -> Result<Vec<u8>> {
            *self.last_request.lock().unwrap() = Some(req);
            if self.fail {
                let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
                return Err(Error::Transport(Box::new(cause)));
            }
            Ok(self.response.clone())
        }
    }

    #[test]
    fn test_execute_with_sends_parsed_request() {
        let backend = MockBackend::new(b"pong");
        let request = Request::parse(
            "curl -X POST 'http://x.test/ping' -H 'X-Id: 7' -H 'Cookie: a=1; b=2' --data 'ping'",
        )
        .unwrap();

        let body = request.execute_with(&backend).unwrap();
        assert_eq!(body, b"pong");

        let sent = backend.last_request.lock().unwrap().take().unwrap();
        assert_eq!(sent.method(), "POST");
        assert_eq!(sent.uri(), "http://x.test/ping");
        assert_eq!(sent.headers()["x-id"], "7");
        assert_eq!(sent.headers()[COOKIE], "a=1; b=2");
        assert_eq!(sent.body(), "ping");
    }

    #[test]
    fn test_execute_with_surfaces_backend_error() {
        let backend = MockBackend {
            fail: true,
            ..MockBackend::new(b"")
        };
        let request = Request::parse("curl 'http://x.test/'").unwrap();
        let err = request.execute_with(&backend).unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "{err:?}");
    }

    #[test]
    fn test_execute_with_rejects_invalid_request_before_sending() {
        let backend = MockBackend::new(b"");
        let request = Request::parse("curl 'not a url'").unwrap();
        let err = request.execute_with(&backend).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)), "{err:?}");
        assert!(backend.last_request.lock().unwrap().is_none());
    }

    #[test]
    fn test_reqwest_backend_reports_connect_failure() {
        let backend = ReqwestBackend::new(Duration::from_secs(2)).unwrap();
        // Free port with nothing listening on it.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let request = Request::parse(&format!("curl 'http://127.0.0.1:{port}/'")).unwrap();
        let err = request.execute_with(&backend).unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "{err:?}");
    }
}
