use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, Response};
use log::debug;
use pandasign_core::{Body, Context, Error, ProvideCredential, Result, Signer, SigningRequest};

use crate::constants::*;
use crate::multipart::MultipartUpload;
use crate::provide_credential::DefaultCredentialProvider;
use crate::sign_request::canonical_query_string;
use crate::{Config, Credential, RequestSigner};

/// PandaApi is the set of calls a PandaStream client can issue.
///
/// `path` is relative to the versioned API root, e.g. `/videos.json`.
/// Every call is signed. Non-success statuses are returned as responses,
/// not errors.
#[async_trait]
pub trait PandaApi: Debug + Send + Sync {
    /// Base URL of the versioned API.
    fn api_url(&self) -> String;

    /// Sign and send a request.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Response<String>>;

    /// Send a signed `GET`.
    async fn get(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Response<String>> {
        self.request(Method::GET, path, params).await
    }

    /// Send a signed `POST`. A `file` parameter turns it into a multipart upload.
    async fn post(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Response<String>> {
        self.request(Method::POST, path, params).await
    }

    /// Send a signed `PUT`.
    async fn put(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Response<String>> {
        self.request(Method::PUT, path, params).await
    }

    /// Send a signed `DELETE`.
    async fn delete(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Response<String>> {
        self.request(Method::DELETE, path, params).await
    }
}

/// Client for the PandaStream API.
///
/// ```no_run
/// use std::collections::BTreeMap;
/// use pandasign_core::{Context, OsEnv};
/// use pandasign_http_send_reqwest::ReqwestHttpSend;
/// use pandasign_pandastream::{Client, Config, PandaApi};
///
/// # async fn example() -> pandasign_core::Result<()> {
/// let ctx = Context::new()
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(OsEnv);
/// let config = Config::new().from_env(&ctx);
///
/// let client = Client::new(ctx, config);
/// let resp = client.get("/videos.json", &BTreeMap::new()).await?;
/// println!("{}", resp.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client loading credentials through [`DefaultCredentialProvider`].
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);
        let signer = Signer::new(
            ctx,
            DefaultCredentialProvider::new(config.clone()),
            RequestSigner::new(),
        );

        Self { config, signer }
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.signer = Signer::new(
            self.signer.context().clone(),
            provider,
            RequestSigner::new(),
        );
        self
    }

    /// Create a client around an existing signer.
    pub fn from_signer(config: Config, signer: Signer<Credential>) -> Self {
        Self {
            config: Arc::new(config),
            signer,
        }
    }

    /// Config of this client.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl PandaApi for Client {
    fn api_url(&self) -> String {
        self.config.api_url()
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Response<String>> {
        let file = params.get(FILE);
        if file.is_some() && method != Method::POST {
            return Err(Error::request_invalid(format!(
                "file upload is only supported by POST, got {method}"
            )));
        }

        let mut signing_req = SigningRequest::new(method.clone(), self.config.host(), path)
            .with_params(params.clone());
        self.signer.sign(&mut signing_req).await?;

        let api_url = self.api_url();
        debug!("sending {method} {api_url}{path}");
        let url = format!(
            "{api_url}{path}?{}",
            canonical_query_string(&signing_req.params)
        );
        let builder = http::Request::builder().method(method).uri(url);

        let req = match file {
            Some(file) => {
                let fields = params
                    .iter()
                    .filter(|(k, _)| k.as_str() != FILE)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let upload = MultipartUpload::new(file).with_fields(fields);
                let content_type = upload.content_type();
                let (body, content_length) = upload.into_body().await?;

                builder
                    .header(CONTENT_TYPE, content_type)
                    .header(CONTENT_LENGTH, content_length)
                    .body(body)?
            }
            None => builder.body(Body::empty())?,
        };

        let resp = self.signer.context().http_send_as_string(req).await?;
        debug!("got response status {} for {path}", resp.status());
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provide_credential::StaticCredentialProvider;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};
    use pandasign_core::{ErrorKind, HttpSend};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Mutex;

    const TEST_TIMESTAMP: &str = "2011-03-01T15:39:10.260762Z";

    #[derive(Debug)]
    struct Recorded {
        method: Method,
        uri: String,
        headers: HeaderMap,
        body: Bytes,
    }

    #[derive(Debug, Clone)]
    struct RecordingHttpSend {
        status: StatusCode,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl RecordingHttpSend {
        fn new(status: StatusCode) -> Self {
            Self {
                status,
                requests: Arc::default(),
            }
        }

        fn take(&self) -> Vec<Recorded> {
            std::mem::take(&mut *self.requests.lock().unwrap())
        }
    }

    #[async_trait]
    impl HttpSend for RecordingHttpSend {
        async fn http_send(&self, req: http::Request<Body>) -> Result<Response<Bytes>> {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?;
            self.requests.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });

            Ok(Response::builder()
                .status(self.status)
                .body(Bytes::from_static(br#"{"id":"d891d9a45c698d587831466f236c6c6c"}"#))?)
        }
    }

    fn test_client(http: RecordingHttpSend) -> Client {
        let ctx = Context::new().with_http_send(http);
        let signer = Signer::new(
            ctx,
            StaticCredentialProvider::new("123456789", "abcdefgh", "ijklmnop"),
            RequestSigner::new().with_timestamp(TEST_TIMESTAMP),
        );
        Client::from_signer(Config::new(), signer)
    }

    #[tokio::test]
    async fn test_get_reference_request() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let http = RecordingHttpSend::new(StatusCode::OK);
        let resp = test_client(http.clone())
            .get("/videos.json", &BTreeMap::new())
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.body(), r#"{"id":"d891d9a45c698d587831466f236c6c6c"}"#);

        let requests = http.take();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(
            requests[0].uri,
            "https://api.pandastream.com/v2/videos.json?access_key=abcdefgh&cloud_id=123456789&signature=kVnZs%2FNX13ldKPdhFYoVnoclr8075DwiZF0TGgIbMsc%3D&timestamp=2011-03-01T15%3A39%3A10.260762Z"
        );
        assert!(requests[0].body.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() -> anyhow::Result<()> {
        let http = RecordingHttpSend::new(StatusCode::UNAUTHORIZED);
        let resp = test_client(http)
            .delete("/videos/d891d9a45c698d587831466f236c6c6c.json", &BTreeMap::new())
            .await?;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_post_with_file_uploads_multipart() -> anyhow::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new()?;
        tmp.write_all(b"not really a video")?;
        let path = tmp.path().to_string_lossy().to_string();

        let http = RecordingHttpSend::new(StatusCode::CREATED);
        let params = BTreeMap::from([
            ("file".to_string(), path.clone()),
            ("payload".to_string(), "1234".to_string()),
        ]);
        test_client(http.clone())
            .post("/videos.json", &params)
            .await?;

        let requests = http.take();
        let req = &requests[0];
        assert_eq!(req.method, Method::POST);
        assert_eq!(
            req.headers[CONTENT_TYPE],
            "multipart/form-data; boundary=^{---panda---}v"
        );
        assert_eq!(
            req.headers[CONTENT_LENGTH].to_str()?,
            req.body.len().to_string()
        );

        let body = String::from_utf8(req.body.to_vec())?;
        assert!(body.starts_with(
            "--^{---panda---}v\r\nContent-Disposition: form-data; name=\"payload\"\r\n\r\n1234\r\n"
        ));
        assert!(body.contains(&format!("name=\"{path}\"; filename=\"{path}\"")));
        assert!(!body.contains("name=\"file\""));
        assert!(req.uri.contains("&file="));

        Ok(())
    }

    #[tokio::test]
    async fn test_put_with_file_is_rejected() {
        let http = RecordingHttpSend::new(StatusCode::OK);
        let params = BTreeMap::from([("file".to_string(), "/tmp/panda.mp4".to_string())]);

        let err = test_client(http.clone())
            .put("/videos.json", &params)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(http.take().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let http = RecordingHttpSend::new(StatusCode::OK);
        let client = Client::new(Context::new().with_http_send(http.clone()), Config::new());

        let err = client
            .get("/videos.json", &BTreeMap::new())
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
        assert!(http.take().is_empty());
    }

    #[tokio::test]
    async fn test_custom_port_url() -> anyhow::Result<()> {
        let http = RecordingHttpSend::new(StatusCode::OK);
        let client = Client::new(
            Context::new().with_http_send(http.clone()),
            Config::new().with_host("localhost").with_port(8080),
        )
        .with_credential_provider(StaticCredentialProvider::new(
            "123456789",
            "abcdefgh",
            "ijklmnop",
        ));
        assert_eq!(client.api_url(), "http://localhost:8080/v2");

        client
            .get(
                "/encodings.json",
                &BTreeMap::from([("status".to_string(), "success".to_string())]),
            )
            .await?;

        let requests = http.take();
        assert!(requests[0]
            .uri
            .starts_with("http://localhost:8080/v2/encodings.json?access_key=abcdefgh&cloud_id=123456789&signature="));
        assert!(requests[0].uri.contains("&status=success&timestamp="));

        Ok(())
    }
}
