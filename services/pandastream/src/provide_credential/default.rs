use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use pandasign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use super::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};

/// Default loader for PandaStream.
///
/// This loader will try to load credentials in the following order:
/// 1. From static configuration
/// 2. From environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new(config: Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config))
            .push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// This allows adding a high-priority credential source that will be tried
    /// before all other providers in the default chain.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let cred = self.chain.provide_credential(ctx).await?;
        if cred.is_none() {
            warn!("no pandastream credential found in config or env");
        }
        Ok(cred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::provide_credential::StaticCredentialProvider;
    use pandasign_core::StaticEnv;
    use std::collections::HashMap;

    fn env_ctx() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (PANDA_CLOUD_ID.to_string(), "env-cloud".to_string()),
                (PANDA_ACCESS_KEY.to_string(), "env-access".to_string()),
                (PANDA_SECRET_KEY.to_string(), "env-secret".to_string()),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_prefers_config() -> anyhow::Result<()> {
        let config = Config::new()
            .with_cloud_id("123456789")
            .with_access_key("abcdefgh")
            .with_secret_key("ijklmnop");

        let cred = DefaultCredentialProvider::new(Arc::new(config))
            .provide_credential(&env_ctx())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.access_key, "abcdefgh");

        Ok(())
    }

    #[tokio::test]
    async fn test_default_falls_back_to_env() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::new(Arc::new(Config::new()))
            .provide_credential(&env_ctx())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.cloud_id, "env-cloud");
        assert_eq!(cred.access_key, "env-access");

        Ok(())
    }

    #[tokio::test]
    async fn test_default_push_front() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::new(Arc::new(Config::new()))
            .push_front(StaticCredentialProvider::new("front", "front-ak", "front-sk"))
            .provide_credential(&env_ctx())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.cloud_id, "front");

        Ok(())
    }

    #[tokio::test]
    async fn test_with_chain_replaces_default_chain() -> anyhow::Result<()> {
        let chain = ProvideCredentialChain::new()
            .push(StaticCredentialProvider::new("chain", "chain-ak", "chain-sk"));

        let cred = DefaultCredentialProvider::with_chain(chain)
            .provide_credential(&env_ctx())
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.cloud_id, "chain");

        let cred = DefaultCredentialProvider::with_chain(ProvideCredentialChain::new())
            .provide_credential(&env_ctx())
            .await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_default_nothing_found() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::new(Arc::new(Config::new()))
            .provide_credential(&Context::new())
            .await?;
        assert!(cred.is_none());

        Ok(())
    }
}
