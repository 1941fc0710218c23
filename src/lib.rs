//! Composable request pipelines over pluggable transports.
//!
//! An [`Endpoint`] turns a typed request value into a typed response value
//! (or a typed failure) by chaining four small, swappable stage functions
//! around a [`Transport`]: request factory, transport call, reply validator,
//! reply decoder. The first failing stage short-circuits the rest, and every
//! stage's error reaches the caller as the endpoint's single failure type.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable request/reply values and transport configuration
//! - [`core`] - Pure transformations (the [`validate`] stream operator)
//! - [`effects`] - I/O seams: the [`Transport`] trait, the [`Endpoint`]
//!   composer, and the `reqwest`-backed adapter
//!
//! # Key Features
//!
//! - **Transport-agnostic**: endpoints only see the [`Transport`] trait; the
//!   adapter's own error type survives intact for the caller's error mapper
//! - **Short-circuiting**: a rejected request never touches the network, a
//!   rejected reply is never decoded
//! - **Stateless**: an endpoint is immutable after construction and safe to
//!   invoke concurrently; invocations are fully independent
//! - **Mechanism-only**: no retry, caching, or auth policy; callers layer
//!   those outside the pipeline

pub mod core;
pub mod data;
pub mod effects;
pub mod error;
pub mod http;

pub use self::core::{Validate, ValidateExt, validate};
pub use self::data::{HttpOptions, Method, Reply, ReplyMeta, Timeouts, TransportRequest};
pub use self::effects::{
    Endpoint, ReplyDecoder, ReplyValidator, RequestFactory, Transport, TransportErrorMapper,
};
pub use self::error::HttpError;

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestTransport;
