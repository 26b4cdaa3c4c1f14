use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tax_core::{CalculationResult, EmailAddress, SaveAck, SaveProfileRequest};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::{FetchOutcome, ProfileService};

/// The body returned by a successful save.
#[derive(Debug, Deserialize)]
struct SavedUser {
    id: Option<i64>,
}

/// [`ProfileService`] over HTTP + JSON.
///
/// | operation             | request                          |
/// |-----------------------|----------------------------------|
/// | `fetch_profile`       | `GET  {base}/profile/{email}`    |
/// | `save_profile`        | `POST {base}/profile` (JSON)     |
/// | `request_calculation` | `POST {base}/calculate/{email}`  |
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    client: Client,
    base_url: Url,
}

impl HttpProfileClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::HttpClient)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base address, percent-encoding each one.
    fn endpoint(
        &self,
        segments: &[&str],
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    what: &'static str,
) -> Result<T, ClientError> {
    let body = response.text().await.map_err(ClientError::Connectivity)?;
    serde_json::from_str(&body).map_err(|source| {
        warn!(what, %source, "malformed response body");
        ClientError::Decode { what, source }
    })
}

#[async_trait]
impl ProfileService for HttpProfileClient {
    async fn fetch_profile(
        &self,
        email: &EmailAddress,
    ) -> Result<FetchOutcome, ClientError> {
        let url = self.endpoint(&["profile", email.as_str()])?;
        debug!(%url, "fetching profile");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "profile fetch failed");
            ClientError::Connectivity(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(%email, "no saved profile");
            return Ok(FetchOutcome::NotFound);
        }
        if !status.is_success() {
            warn!(%status, "profile fetch rejected");
            return Err(ClientError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let profile = read_json(response, "profile").await?;
        Ok(FetchOutcome::Found(profile))
    }

    async fn save_profile(
        &self,
        request: &SaveProfileRequest,
    ) -> Result<SaveAck, ClientError> {
        let url = self.endpoint(&["profile"])?;
        debug!(%url, email = %request.email, "saving profile");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Connectivity)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "profile save rejected");
            return Err(ClientError::SaveFailed {
                status: status.as_u16(),
            });
        }

        // The stored user's id is informational; an odd body does not undo the save.
        let body = response.text().await.unwrap_or_default();
        let user_id = serde_json::from_str::<SavedUser>(&body)
            .ok()
            .and_then(|user| user.id);

        Ok(SaveAck {
            status: status.as_u16(),
            user_id,
        })
    }

    async fn request_calculation(
        &self,
        email: &EmailAddress,
    ) -> Result<CalculationResult, ClientError> {
        let url = self.endpoint(&["calculate", email.as_str()])?;
        debug!(%url, "requesting calculation");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(ClientError::Connectivity)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "calculation rejected");
            return Err(ClientError::CalculationFailed {
                status: status.as_u16(),
            });
        }

        read_json(response, "calculation").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base: &str) -> HttpProfileClient {
        HttpProfileClient::new(&ClientConfig::default().with_base_url(base)).unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let url = client("http://127.0.0.1:8000")
            .endpoint(&["profile", "a@b.co"])
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/profile/a@b.co");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let url = client("http://tax.local/api/").endpoint(&["calculate", "a@b.co"]).unwrap();
        assert_eq!(url.as_str(), "http://tax.local/api/calculate/a@b.co");
    }

    #[test]
    fn endpoint_encodes_reserved_characters() {
        let url = client("http://tax.local").endpoint(&["profile", "a/b#c@d.io"]).unwrap();
        assert_eq!(url.as_str(), "http://tax.local/profile/a%2Fb%23c@d.io");
    }

    #[test]
    fn rejects_unusable_base_url() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let result = HttpProfileClient::new(&ClientConfig::default().with_base_url(base));
            assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
        }
    }
}
