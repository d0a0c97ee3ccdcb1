use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use pandasign_core::{Context, ProvideCredential, Result};

use crate::{Config, Credential};

/// ConfigCredentialProvider builds credentials out of a [`Config`].
///
/// Nothing is loaded unless `cloud_id`, `access_key` and `secret_key` are
/// all set. Call [`Config::from_env`] first to fill missing fields from env.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref();

        match (&config.cloud_id, &config.access_key, &config.secret_key) {
            (Some(cloud_id), Some(access_key), Some(secret_key)) => {
                debug!("loading credential from config");
                Ok(Some(Credential::new(cloud_id, access_key, secret_key)))
            }
            _ => {
                debug!("incomplete config, skipping");
                Ok(None)
            }
        }
    }
}
