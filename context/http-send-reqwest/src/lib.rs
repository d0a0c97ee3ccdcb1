//! Reqwest-based transport for pandasign.
//!
//! This crate provides `ReqwestHttpSend`, which implements the `HttpSend`
//! trait from `pandasign_core` on top of a `reqwest::Client`.
//!
//! ## Example
//!
//! ```no_run
//! use pandasign_core::{Context, OsEnv};
//! use pandasign_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! ```
//!
//! Streaming request bodies are forwarded chunk by chunk, so uploads are
//! never buffered by the transport.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use pandasign_core::{Body, Error, HttpSend, Result};
use reqwest::{Client, Request};

/// Reqwest implementation of [`HttpSend`].
///
/// The default client uses rustls with the built-in root certificates and
/// always verifies server certificates.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The given client must keep certificate verification enabled.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn into_reqwest_body(body: Body) -> reqwest::Body {
    match body {
        Body::Empty => reqwest::Body::from(Bytes::new()),
        Body::Stream(stream) => reqwest::Body::wrap_stream(stream),
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Body>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        debug!("sending {} request to {}", parts.method, parts.uri.path());

        let req = Request::try_from(http::Request::from_parts(parts, into_reqwest_body(body)))
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to execute request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
