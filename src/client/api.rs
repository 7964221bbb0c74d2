use async_trait::async_trait;
use http::StatusCode;
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ErrorBody, Investment, InvestmentInput, TypeCount, ValidationErrorBody};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Status { status: StatusCode, message: String },

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Operations the dashboard performs against the investments API.
#[async_trait]
pub trait InvestmentApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Investment>, ClientError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Investment, ClientError>;

    async fn create(&self, data: &InvestmentInput) -> Result<Investment, ClientError>;

    async fn update(&self, id: Uuid, data: &InvestmentInput) -> Result<Investment, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;

    async fn get_distribution(&self) -> Result<Vec<TypeCount>, ClientError>;
}

pub struct HttpInvestmentApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInvestmentApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        url::Url::parse(base_url)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a non-success response into a `ClientError::Status`, keeping the server's detail.
async fn check(response: Response, context: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = if let Ok(parsed) = serde_json::from_str::<ValidationErrorBody>(&body) {
        parsed
            .errors
            .iter()
            .map(|e| e.msg.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    } else if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        parsed.error
    } else {
        String::new()
    };

    let message = if detail.is_empty() {
        context.to_string()
    } else {
        format!("{}: {}", context, detail)
    };
    Err(ClientError::Status { status, message })
}

async fn json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ClientError> {
    let response = check(response, context).await?;
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl InvestmentApi for HttpInvestmentApi {
    async fn get_all(&self) -> Result<Vec<Investment>, ClientError> {
        let response = self.client.get(self.url("/investments")).send().await?;
        json(response, "Failed to fetch investments").await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Investment, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/investments/{}", id)))
            .send()
            .await?;
        json(response, "Failed to fetch investment").await
    }

    async fn create(&self, data: &InvestmentInput) -> Result<Investment, ClientError> {
        let response = self
            .client
            .post(self.url("/investments"))
            .json(data)
            .send()
            .await?;
        json(response, "Failed to create investment").await
    }

    async fn update(&self, id: Uuid, data: &InvestmentInput) -> Result<Investment, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/investments/{}", id)))
            .json(data)
            .send()
            .await?;
        json(response, "Failed to update investment").await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/investments/{}", id)))
            .send()
            .await?;
        check(response, "Failed to delete investment").await?;
        Ok(())
    }

    async fn get_distribution(&self) -> Result<Vec<TypeCount>, ClientError> {
        let response = self
            .client
            .get(self.url("/investments/types/distribution"))
            .send()
            .await?;
        json(response, "Failed to fetch type distribution").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpInvestmentApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.url("/investments"), "http://localhost:3000/investments");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            HttpInvestmentApi::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
