//! PandaStream signing and client implementation for pandasign.
//!
//! PandaStream authenticates every API call with four query parameters:
//! `cloud_id`, `access_key`, `timestamp` and `signature`. The signature is a
//! base64 HMAC-SHA256 over the verb, host, path and the canonical query
//! string of all other parameters.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use pandasign_core::{Context, OsEnv};
//! use pandasign_http_send_reqwest::ReqwestHttpSend;
//! use pandasign_pandastream::{Client, Config, PandaApi};
//!
//! # async fn example() -> pandasign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! let config = Config::new()
//!     .with_cloud_id("123456789")
//!     .with_access_key("abcdefgh")
//!     .with_secret_key("ijklmnop");
//! let client = Client::new(ctx, config);
//!
//! let params = BTreeMap::from([
//!     ("file".to_string(), "panda.mp4".to_string()),
//! ]);
//! let resp = client.post("/videos.json", &params).await?;
//! println!("{}: {}", resp.status(), resp.body());
//! # Ok(())
//! # }
//! ```
//!
//! ## Signing only
//!
//! [`signed_params`] is a pure function and can be used without a client:
//!
//! ```
//! use std::collections::BTreeMap;
//! use http::Method;
//! use pandasign_pandastream::{canonical_query_string, escape, signed_params, Credential};
//!
//! let cred = Credential::new("123456789", "abcdefgh", "ijklmnop");
//! let (params, signature) = signed_params(
//!     &cred,
//!     &Method::GET,
//!     "api.pandastream.com",
//!     "/videos.json",
//!     &BTreeMap::new(),
//!     "2011-03-01T15:39:10.260762Z",
//! )
//! .unwrap();
//!
//! assert_eq!(escape(&signature), "kVnZs%2FNX13ldKPdhFYoVnoclr8075DwiZF0TGgIbMsc%3D");
//! assert!(canonical_query_string(&params).starts_with("access_key=abcdefgh&cloud_id=123456789"));
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export PANDA_CLOUD_ID=123456789
//! export PANDA_ACCESS_KEY=abcdefgh
//! export PANDA_SECRET_KEY=ijklmnop
//! # optional
//! export PANDA_API_HOST=api.pandastream.com
//! export PANDA_API_PORT=443
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::{API_VERSION, DEFAULT_API_HOST, DEFAULT_API_PORT};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{canonical_query_string, escape, signed_params, string_to_sign};
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod multipart;
pub use multipart::MultipartUpload;

mod client;
pub use client::{Client, PandaApi};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
