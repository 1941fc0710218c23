//! Data layer: immutable request/reply values and transport configuration.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

/// HTTP method of a [`TransportRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-native request value produced by a request factory.
///
/// Owned transiently within one invocation and handed to the transport;
/// never retained across invocations.
///
/// # Examples
///
/// ```
/// use wirepoint::data::TransportRequest;
///
/// let request = TransportRequest::get("https://api.example.com/users/42")
///     .header("Accept", "application/json");
/// assert_eq!(request.url, "https://api.example.com/users/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method:  Method,
    pub url:     String,
    pub headers: Vec<(String, String)>,
    pub body:    Option<Bytes>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self { Self::new(Method::Get, url) }

    pub fn post(url: impl Into<String>) -> Self { Self::new(Method::Post, url) }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Metadata of a transport reply: status line and headers as received,
/// plus the URL the reply was ultimately served from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyMeta {
    pub status:  u16,
    pub headers: Vec<(String, String)>,
    pub url:     String,
}

impl ReplyMeta {
    /// Value of the first header with the given name, compared
    /// case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-native reply consumed by the validator and decoder stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: Bytes,
    pub meta: ReplyMeta,
}

impl Reply {
    pub fn new(body: impl Into<Bytes>, meta: ReplyMeta) -> Self {
        Self { body: body.into(), meta }
    }
}

/// Connection and read deadlines applied by a transport adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read:    Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(30),
            read:    Duration::from_secs(30),
        }
    }
}

/// Configuration for HTTP transport adapters.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wirepoint::data::HttpOptions;
///
/// let options = HttpOptions::default()
///     .header("User-Agent", "wirepoint")
///     .connect_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Headers applied to every request. A request header with the same
    /// name (compared case-insensitively) replaces the default.
    pub headers:  Vec<(String, String)>,
    pub timeouts: Timeouts,
}

impl HttpOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.read = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_accumulates_headers() {
        let request = TransportRequest::post("https://example.com")
            .header("Accept", "application/json")
            .header("X-Trace", "abc")
            .body("payload");

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.body, Some(Bytes::from("payload")));
    }

    #[test]
    fn reply_meta_header_lookup_is_case_insensitive() {
        let meta = ReplyMeta {
            status:  200,
            headers: vec![("Content-Type".into(), "text/plain".into())],
            url:     "https://example.com".into(),
        };

        assert_eq!(meta.header("content-type"), Some("text/plain"));
        assert_eq!(meta.header("etag"), None);
    }

    #[test]
    fn options_defaults() {
        let options = HttpOptions::default();
        assert!(options.headers.is_empty());
        assert_eq!(options.timeouts.connect, Duration::from_secs(30));
        assert_eq!(options.timeouts.read, Duration::from_secs(30));
    }
}
