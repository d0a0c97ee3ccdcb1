// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::Credential;
use async_trait::async_trait;
use pandasign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static PandaStream credentials.
///
/// This provider is used when you have the cloud id, access key and secret
/// key directly and want to use them without any dynamic loading.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    cloud_id: String,
    access_key: String,
    secret_key: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(cloud_id: &str, access_key: &str, secret_key: &str) -> Self {
        Self {
            cloud_id: cloud_id.to_string(),
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(
            &self.cloud_id,
            &self.access_key,
            &self.secret_key,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("123456789", "abcdefgh", "ijklmnop");
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("static provider always yields a credential");

        assert_eq!(cred.cloud_id, "123456789");
        assert_eq!(cred.access_key, "abcdefgh");
        assert_eq!(cred.secret_key, "ijklmnop");

        Ok(())
    }
}
