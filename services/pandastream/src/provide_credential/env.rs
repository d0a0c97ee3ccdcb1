use crate::{constants::*, Credential};
use async_trait::async_trait;
use log::debug;
use pandasign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads PandaStream credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `PANDA_CLOUD_ID`: The cloud to act on
/// - `PANDA_ACCESS_KEY`: The access key
/// - `PANDA_SECRET_KEY`: The secret key
///
/// All of them must be present, otherwise nothing is loaded.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match (
            ctx.env_var(PANDA_CLOUD_ID),
            ctx.env_var(PANDA_ACCESS_KEY),
            ctx.env_var(PANDA_SECRET_KEY),
        ) {
            (Some(cloud_id), Some(access_key), Some(secret_key)) => {
                debug!("loading credential from env");
                Ok(Some(Credential::new(cloud_id, access_key, secret_key)))
            }
            _ => Ok(None),
        }
    }
}
