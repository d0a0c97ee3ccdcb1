use std::fmt::{Debug, Formatter};

use log::warn;
use pandasign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for pandastream.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PANDA_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PANDA_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `cloud_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PANDA_CLOUD_ID`]
    pub cloud_id: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PANDA_API_HOST`]
    /// - default to [`DEFAULT_API_HOST`]
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`PANDA_API_PORT`]
    /// - default to [`DEFAULT_API_PORT`]
    pub port: Option<u16>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set cloud_id
    pub fn with_cloud_id(mut self, cloud_id: impl Into<String>) -> Self {
        self.cloud_id = Some(cloud_id.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set win over env values. An unparsable
    /// port is ignored.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(PANDA_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PANDA_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PANDA_CLOUD_ID) {
            self.cloud_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PANDA_API_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(PANDA_API_PORT) {
            match v.parse::<u16>() {
                Ok(port) => {
                    self.port.get_or_insert(port);
                }
                Err(e) => warn!("ignore invalid {PANDA_API_PORT} {v:?}: {e}"),
            }
        }

        self
    }

    /// API host, without scheme or port.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// API port.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_API_PORT)
    }

    /// `https` on port 443, `http` on every other port.
    pub fn scheme(&self) -> &'static str {
        if self.port() == 443 {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL of the versioned API, e.g. `https://api.pandastream.com/v2`.
    ///
    /// The port is only spelled out when it isn't the scheme's default.
    pub fn api_url(&self) -> String {
        match self.port() {
            443 | 80 => format!("{}://{}/v{}", self.scheme(), self.host(), API_VERSION),
            port => format!(
                "{}://{}:{}/v{}",
                self.scheme(),
                self.host(),
                port,
                API_VERSION
            ),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("cloud_id", &Redact::from(&self.cloud_id))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandasign_core::StaticEnv;
    use std::collections::HashMap;
    use test_case::test_case;

    fn ctx_with(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = ctx_with(&[
            (PANDA_ACCESS_KEY, "abcdefgh"),
            (PANDA_SECRET_KEY, "ijklmnop"),
            (PANDA_CLOUD_ID, "123456789"),
            (PANDA_API_HOST, "api-eu.pandastream.com"),
            (PANDA_API_PORT, "80"),
        ]);

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.access_key.as_deref(), Some("abcdefgh"));
        assert_eq!(cfg.secret_key.as_deref(), Some("ijklmnop"));
        assert_eq!(cfg.cloud_id.as_deref(), Some("123456789"));
        assert_eq!(cfg.host(), "api-eu.pandastream.com");
        assert_eq!(cfg.port(), 80);
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = ctx_with(&[(PANDA_ACCESS_KEY, "from-env"), (PANDA_API_PORT, "8080")]);

        let cfg = Config::new()
            .with_access_key("explicit")
            .with_port(443)
            .from_env(&ctx);
        assert_eq!(cfg.access_key.as_deref(), Some("explicit"));
        assert_eq!(cfg.port(), 443);
    }

    #[test]
    fn test_from_env_ignores_invalid_port() {
        let _ = env_logger::builder().is_test(true).try_init();

        let cfg = Config::new().from_env(&ctx_with(&[(PANDA_API_PORT, "https")]));
        assert_eq!(cfg.port, None);
        assert_eq!(cfg.port(), DEFAULT_API_PORT);
    }

    #[test_case(None, "https://api.pandastream.com/v2"; "default")]
    #[test_case(Some(443), "https://api.pandastream.com/v2"; "https")]
    #[test_case(Some(80), "http://api.pandastream.com/v2"; "http")]
    #[test_case(Some(8080), "http://api.pandastream.com:8080/v2"; "custom port")]
    fn test_api_url(port: Option<u16>, expected: &str) {
        let cfg = Config {
            port,
            ..Default::default()
        };
        assert_eq!(cfg.api_url(), expected);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cfg = Config::new()
            .with_access_key("abcdefgh")
            .with_secret_key("ijklmnopqrstuvwxyz");

        let output = format!("{cfg:?}");
        assert!(!output.contains("abcdefgh"));
        assert!(!output.contains("ijklmnopqrstuvwxyz"));
        assert!(output.contains("ijk***xyz"));
    }
}
