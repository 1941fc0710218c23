//! Ready-made stage functions and shorthand constructors for HTTP endpoints.

use crate::data::Reply;
use crate::error::HttpError;

#[cfg(feature = "json")]
use crate::data::TransportRequest;
#[cfg(feature = "json")]
use crate::effects::{Endpoint, Transport};

/// Reply validator accepting any 2xx status and failing with
/// [`HttpError::Status`] otherwise.
pub fn status_validator() -> impl Fn(&Reply) -> Result<(), HttpError> + Send + Sync + 'static {
    |reply: &Reply| {
        let code = reply.meta.status;
        if (200..300).contains(&code) {
            Ok(())
        } else {
            Err(HttpError::Status { code })
        }
    }
}

/// Reply decoder deserializing the body as JSON.
#[cfg(feature = "json")]
pub fn json_decoder<R>() -> impl Fn(Reply) -> Result<R, HttpError> + Send + Sync + 'static
where
    R: serde::de::DeserializeOwned,
{
    |reply: Reply| serde_json::from_slice(&reply.body).map_err(HttpError::from)
}

/// Compose a JSON endpoint from a transport and a request factory alone,
/// defaulting the remaining stages: transport errors convert via `From`,
/// replies must carry a 2xx status, and bodies deserialize into `Resp`.
#[cfg(feature = "json")]
pub fn json_endpoint<T, Req, Resp>(
    transport: T,
    request_factory: impl Fn(Req) -> Result<TransportRequest, HttpError> + Send + Sync + 'static,
) -> Endpoint<T, Req, Resp, HttpError>
where
    T: Transport,
    HttpError: From<T::Error>,
    Resp: serde::de::DeserializeOwned,
{
    Endpoint::new(
        transport,
        request_factory,
        HttpError::from,
        status_validator(),
        json_decoder(),
    )
}
