//! PandaStream request signing.
use std::collections::BTreeMap;

use async_trait::async_trait;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use pandasign_core::hash::base64_hmac_sha256;
use pandasign_core::time::{format_iso8601_micros, now};
use pandasign_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements PandaStream API authentication.
///
/// Every request carries `cloud_id`, `access_key`, `timestamp` and
/// `signature` query parameters. The signature is a base64 HMAC-SHA256 over
///
/// ```text
/// VERB + "\n" +
/// lowercase(host) + "\n" +
/// path + "\n" +
/// CanonicalQueryString
/// ```
///
/// where the canonical query string covers every parameter except `file`.
#[derive(Debug, Default)]
pub struct RequestSigner {
    timestamp: Option<String>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing timestamp.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut SigningRequest,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| format_iso8601_micros(now()));

        let (params, _) = signed_params(
            cred,
            &req.method,
            &req.host,
            &req.path,
            &req.params,
            &timestamp,
        )?;
        req.params = params;

        Ok(())
    }
}

/// Escape a query key or value.
///
/// Every byte except ASCII alphanumerics and `-`, `_`, `.`, `~` is
/// percent-encoded with upper-case hex; space becomes `%20`.
///
/// ```
/// use pandasign_pandastream::escape;
///
/// assert_eq!(escape("a b/c~d"), "a%20b%2Fc~d");
/// ```
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, &PANDA_QUERY_ENCODE_SET).to_string()
}

/// Build the canonical query string of the given parameters.
///
/// Entries are ordered by the bytes of their unescaped key, then emitted as
/// `escape(key)=escape(value)` joined by `&`. The result doesn't depend on
/// the iteration order of the input.
///
/// ```
/// use std::collections::HashMap;
/// use pandasign_pandastream::canonical_query_string;
///
/// let params = HashMap::from([("b", "2"), ("a", "x y")]);
/// assert_eq!(canonical_query_string(params), "a=x%20y&b=2");
/// ```
pub fn canonical_query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = params.into_iter().collect();
    pairs.sort_by(|a, b| {
        a.0.as_ref()
            .as_bytes()
            .cmp(b.0.as_ref().as_bytes())
            .then_with(|| a.1.as_ref().cmp(b.1.as_ref()))
    });

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in pairs.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&escape(k.as_ref()));
        s.push('=');
        s.push_str(&escape(v.as_ref()));
    }

    s
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// uppercase(VERB) + "\n" +
/// lowercase(host) + "\n" +
/// path + "\n" +
/// CanonicalQueryString
/// ```
pub fn string_to_sign(method: &Method, host: &str, path: &str, canonical_query: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method.as_str().to_uppercase(),
        host.to_lowercase(),
        path,
        canonical_query
    )
}

/// Compute the signed parameter set of a request.
///
/// The returned map holds `cloud_id`, `access_key`, `timestamp`, every
/// caller parameter (key and value escaped once) and finally `signature`.
/// The signature itself is returned alongside for convenience.
///
/// Caller parameters are inserted after the auth parameters, so a caller
/// supplying `timestamp` replaces the generated one. The `file` parameter
/// stays in the returned set but never enters the signature.
pub fn signed_params(
    cred: &Credential,
    method: &Method,
    host: &str,
    path: &str,
    params: &BTreeMap<String, String>,
    timestamp: &str,
) -> Result<(BTreeMap<String, String>, String)> {
    let mut auth_params = BTreeMap::from([
        (CLOUD_ID.to_string(), cred.cloud_id.clone()),
        (ACCESS_KEY.to_string(), cred.access_key.clone()),
        (TIMESTAMP.to_string(), timestamp.to_string()),
    ]);
    for (k, v) in params {
        auth_params.insert(escape(k), escape(v));
    }

    let canonical_query = canonical_query_string(auth_params.iter().filter(|(k, _)| *k != FILE));
    let string_to_sign = string_to_sign(method, host, path, &canonical_query);
    debug!("string to sign: {}", &string_to_sign);

    let signature = base64_hmac_sha256(cred.secret_key.as_bytes(), string_to_sign.as_bytes())?;
    auth_params.insert(SIGNATURE.to_string(), signature.clone());

    Ok((auth_params, signature))
}
