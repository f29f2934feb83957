use serde::de::DeserializeOwned;
use storage::dto::comic::ComicResponse;
use storage::dto::common::ApiResponse;
use storage::dto::competition::CompetitionResponse;
use storage::dto::registration::{
    RegistrationConfirmation, RegistrationListResponse, RegistrationRequest,
};

use crate::error::{ClientError, Result};
use crate::retry::with_retry;

/// Typed client for the competitions API.
///
/// Read calls go through the retry wrapper. The registration write is sent
/// exactly once: if the first attempt reached the server but its response
/// was lost, a blind resend would register the team twice.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn list_competitions(&self) -> Result<Vec<CompetitionResponse>> {
        self.get_enveloped("/api/competitions").await
    }

    pub async fn get_competition(&self, id: i32) -> Result<CompetitionResponse> {
        self.get_enveloped(&format!("/api/competitions/{id}")).await
    }

    pub async fn list_registrations(
        &self,
        competition_id: i32,
        page: u32,
        limit: u32,
        sort: Option<&str>,
    ) -> Result<RegistrationListResponse> {
        let mut path =
            format!("/api/competitions/{competition_id}/registrations?page={page}&limit={limit}");
        if let Some(sort) = sort {
            path.push_str("&sort=");
            path.push_str(sort);
        }

        with_retry(|| self.get_json(&path)).await
    }

    pub async fn comic_of_month(&self) -> Result<ComicResponse> {
        self.get_enveloped("/api/comics/comic-of-the-month").await
    }

    pub async fn register(
        &self,
        competition_id: i32,
        request: &RegistrationRequest,
    ) -> Result<RegistrationConfirmation> {
        let url = format!("{}/api/competitions/{competition_id}/register", self.base_url);

        let response = self.client.post(url).json(request).send().await?;
        let envelope: ApiResponse<RegistrationConfirmation> = Self::decode(response).await?;
        Self::unwrap_data(envelope)
    }

    async fn get_enveloped<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: ApiResponse<T> = with_retry(|| self.get_json(path)).await?;
        Self::unwrap_data(envelope)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    /// Turns an error-status response into the `ApiError` it carries;
    /// success responses decode into the caller's type.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if status >= 400 {
            let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(&bytes)?;
            let message = envelope
                .message
                .or(envelope.error)
                .unwrap_or_else(|| format!("Request failed with status {status}"));

            return Err(ClientError::ApiError {
                status,
                message,
                errors: envelope.errors.unwrap_or_default(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn unwrap_data<T>(envelope: ApiResponse<T>) -> Result<T> {
        envelope
            .data
            .ok_or_else(|| ClientError::UnexpectedResponse("missing data field".to_string()))
    }
}

/// Submission seam between the form controller and the network.
#[async_trait::async_trait]
pub trait CompetitionRegistrar: Send + Sync {
    async fn register(
        &self,
        competition_id: i32,
        request: &RegistrationRequest,
    ) -> Result<RegistrationConfirmation>;
}

#[async_trait::async_trait]
impl CompetitionRegistrar for ApiClient {
    async fn register(
        &self,
        competition_id: i32,
        request: &RegistrationRequest,
    ) -> Result<RegistrationConfirmation> {
        ApiClient::register(self, competition_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");

        let client = ApiClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_unwrap_data_requires_payload() {
        let envelope = ApiResponse::success(5);
        assert_eq!(ApiClient::unwrap_data(envelope).unwrap(), 5);

        let empty: ApiResponse<i32> = ApiResponse {
            success: true,
            data: None,
            message: Some("ok".to_string()),
            errors: None,
            error: None,
        };
        assert!(matches!(
            ApiClient::unwrap_data(empty),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }
}
