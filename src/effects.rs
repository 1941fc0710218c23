//! Effects layer: the transport seam and the endpoint composer.

use std::future::Future;

use crate::data::{Reply, TransportRequest};

/// Asynchronous transport abstraction.
///
/// This trait is the only seam through which real I/O happens. An
/// implementation turns one [`TransportRequest`] into exactly one terminal
/// event: a [`Reply`] or an error of its own type. The associated `Error`
/// keeps the concrete transport's failure intact so an endpoint's error
/// mapper sees the full original error, not a stringified copy.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: production implementation using `reqwest`
/// - Mock implementations for testing
pub trait Transport: Send + Sync {
    /// Error type for transport operations.
    type Error: std::error::Error + Send + 'static;

    /// Execute the request and return the reply.
    ///
    /// Implementations handle their own connection management, timeout
    /// configuration, and redirect policy.
    fn call(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<Reply, Self::Error>> + Send;
}

/// Builds a transport-native request from a caller's request value, or
/// rejects it before any I/O happens.
pub type RequestFactory<Req, E> =
    Box<dyn Fn(Req) -> Result<TransportRequest, E> + Send + Sync>;

/// Converts a transport's native error into the endpoint's failure type.
pub type TransportErrorMapper<TE, E> = Box<dyn Fn(TE) -> E + Send + Sync>;

/// Accepts or rejects a reply before decoding runs.
pub type ReplyValidator<E> = Box<dyn Fn(&Reply) -> Result<(), E> + Send + Sync>;

/// Converts an accepted reply into the caller's response value.
pub type ReplyDecoder<Resp, E> = Box<dyn Fn(Reply) -> Result<Resp, E> + Send + Sync>;

/// A composed request pipeline: one function from `Req` to
/// `Result<Resp, E>`, assembled from a transport and four stage functions.
///
/// Stages run strictly in order per invocation — request factory, transport
/// call, reply validator, reply decoder — and the first failure
/// short-circuits everything after it. The endpoint holds no mutable state:
/// construct it once and invoke it concurrently from as many call sites as
/// needed.
///
/// # Examples
///
/// ```no_run
/// use wirepoint::data::{Reply, TransportRequest};
/// use wirepoint::effects::{Endpoint, ReqwestTransport};
///
/// # async fn example() -> Result<(), String> {
/// let endpoint = Endpoint::new(
///     ReqwestTransport::new().map_err(|e| e.to_string())?,
///     |id: u64| Ok(TransportRequest::get(format!("https://api.example.com/users/{id}"))),
///     |error| error.to_string(),
///     |reply: &Reply| {
///         if reply.meta.status == 200 { Ok(()) } else { Err("bad status".to_string()) }
///     },
///     |reply| String::from_utf8(reply.body.to_vec()).map_err(|e| e.to_string()),
/// );
///
/// let body = endpoint.invoke(42).await?;
/// # let _ = body;
/// # Ok(())
/// # }
/// ```
pub struct Endpoint<T: Transport, Req, Resp, E> {
    transport:       T,
    request_factory: RequestFactory<Req, E>,
    error_mapper:    TransportErrorMapper<T::Error, E>,
    validator:       ReplyValidator<E>,
    decoder:         ReplyDecoder<Resp, E>,
}

impl<T, Req, Resp, E> Endpoint<T, Req, Resp, E>
where
    T: Transport,
{
    /// Compose an endpoint from its five collaborators.
    pub fn new(
        transport: T,
        request_factory: impl Fn(Req) -> Result<TransportRequest, E> + Send + Sync + 'static,
        error_mapper: impl Fn(T::Error) -> E + Send + Sync + 'static,
        validator: impl Fn(&Reply) -> Result<(), E> + Send + Sync + 'static,
        decoder: impl Fn(Reply) -> Result<Resp, E> + Send + Sync + 'static,
    ) -> Self {
        Self {
            transport,
            request_factory: Box::new(request_factory),
            error_mapper: Box::new(error_mapper),
            validator: Box::new(validator),
            decoder: Box::new(decoder),
        }
    }

    /// Run the pipeline once for `request`.
    ///
    /// Exactly one `Ok` or one `Err` is produced per call. Stages after a
    /// failing stage never run: a rejected request never reaches the
    /// transport, a transport failure is mapped and returned before
    /// validation, and a rejected reply is never decoded.
    ///
    /// Dropping the returned future cancels the invocation; the in-flight
    /// transport call is dropped with it and no later stage runs.
    pub async fn invoke(&self, request: Req) -> Result<Resp, E> {
        let transport_request = (self.request_factory)(request)?;
        tracing::debug!(
            method = %transport_request.method,
            url = %transport_request.url,
            "dispatching request"
        );

        let reply = match self.transport.call(transport_request).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::debug!("transport call failed");
                return Err((self.error_mapper)(error));
            }
        };

        tracing::trace!(
            status = reply.meta.status,
            bytes = reply.body.len(),
            "reply received"
        );

        (self.validator)(&reply)?;
        (self.decoder)(reply)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use super::*;
    use crate::data::{HttpOptions, Method, ReplyMeta};

    /// Production transport implementation using reqwest.
    ///
    /// `reqwest::Client` is internally reference-counted and pooled, so one
    /// `ReqwestTransport` can back any number of endpoints.
    pub struct ReqwestTransport {
        client:  reqwest::Client,
        options: HttpOptions,
    }

    impl ReqwestTransport {
        /// Create a transport with default [`HttpOptions`].
        pub fn new() -> Result<Self, reqwest::Error> {
            Self::with_options(HttpOptions::default())
        }

        /// Create a transport applying the given options to every request.
        pub fn with_options(options: HttpOptions) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder()
                .connect_timeout(options.timeouts.connect)
                .timeout(options.timeouts.read)
                .build()?;
            Ok(Self { client, options })
        }
    }

    /// Adapter defaults with same-named request headers removed, followed by
    /// the request's own headers. `reqwest::RequestBuilder::header` appends
    /// rather than replaces, so shadowed defaults must be dropped here or
    /// both values would go on the wire.
    fn merged_headers<'a>(
        defaults: &'a [(String, String)],
        overrides: &'a [(String, String)],
    ) -> impl Iterator<Item = &'a (String, String)> {
        defaults
            .iter()
            .filter(|(name, _)| !overrides.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)))
            .chain(overrides.iter())
    }

    fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn call(&self, request: TransportRequest) -> Result<Reply, Self::Error> {
            tracing::trace!(url = %request.url, "opening connection");

            let mut builder = self
                .client
                .request(to_reqwest_method(request.method), request.url.as_str());

            for (name, value) in merged_headers(&self.options.headers, &request.headers) {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;

            let meta = ReplyMeta {
                status:  response.status().as_u16(),
                url:     response.url().to_string(),
                headers: response
                    .headers()
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.to_string(),
                            String::from_utf8_lossy(value.as_bytes()).into_owned(),
                        )
                    })
                    .collect(),
            };
            let body = response.bytes().await?;

            Ok(Reply { body, meta })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
            raw.iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect()
        }

        #[test]
        fn per_request_headers_replace_same_named_defaults() {
            let defaults = pairs(&[("Authorization", "default-token"), ("Accept", "text/plain")]);
            let overrides = pairs(&[("authorization", "request-token")]);

            let merged: Vec<_> = merged_headers(&defaults, &overrides).collect();

            assert_eq!(merged.len(), 2);
            assert_eq!(merged[0].0, "Accept");
            assert_eq!(merged[1], &("authorization".to_string(), "request-token".to_string()));
            // The shadowed default must not survive alongside the override.
            assert!(!merged.iter().any(|(_, v)| v == "default-token"));
        }

        #[test]
        fn unshadowed_defaults_are_kept() {
            let defaults = pairs(&[("User-Agent", "wirepoint")]);
            let overrides = pairs(&[("Accept", "application/json")]);

            let merged: Vec<_> = merged_headers(&defaults, &overrides).collect();

            assert_eq!(merged.len(), 2);
            assert_eq!(merged[0].0, "User-Agent");
            assert_eq!(merged[1].0, "Accept");
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReplyMeta;

    #[derive(Debug, PartialEq, Eq)]
    struct StubError(&'static str);

    impl std::fmt::Display for StubError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for StubError {}

    struct StubTransport {
        outcome: Result<Reply, &'static str>,
    }

    impl Transport for StubTransport {
        type Error = StubError;

        fn call(
            &self,
            _request: TransportRequest,
        ) -> impl Future<Output = Result<Reply, Self::Error>> + Send {
            let outcome = self.outcome.clone().map_err(StubError);
            async move { outcome }
        }
    }

    fn reply(status: u16, body: &str) -> Reply {
        Reply::new(
            body.as_bytes().to_vec(),
            ReplyMeta {
                status,
                headers: Vec::new(),
                url: "stub://".into(),
            },
        )
    }

    #[tokio::test]
    async fn decoded_response_is_delivered() {
        let endpoint = Endpoint::new(
            StubTransport {
                outcome: Ok(reply(200, "pong")),
            },
            |name: &'static str| Ok(TransportRequest::get(format!("stub://{name}"))),
            |error: StubError| error.0,
            |_reply| Ok(()),
            |reply| String::from_utf8(reply.body.to_vec()).map_err(|_| "not utf-8"),
        );

        assert_eq!(endpoint.invoke("ping").await, Ok("pong".to_string()));
    }

    #[tokio::test]
    async fn transport_error_goes_through_the_mapper() {
        let endpoint = Endpoint::new(
            StubTransport {
                outcome: Err("connection refused"),
            },
            |_: ()| Ok(TransportRequest::get("stub://x")),
            |error: StubError| format!("mapped: {}", error.0),
            |_reply| Ok(()),
            |_reply| Ok(()),
        );

        assert_eq!(
            endpoint.invoke(()).await,
            Err("mapped: connection refused".to_string())
        );
    }
}
