use reqwest::{Client, StatusCode};
use tracing::instrument;

use crate::config::AppSettings;
use crate::stripe_types::SubscriptionList;
use crate::utils::http_client;

// Base URL for the Stripe API
const STRIPE_BASE_URL: &str = "https://api.stripe.com/v1";

// Stripe caps list endpoints at 100 records per page
const PAGE_SIZE: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// The API key was rejected. The caller must re-collect the credential;
    /// retrying with the same key cannot succeed.
    #[error("Stripe rejected the API key")]
    Unauthorized,
    /// Unexpected status code or undecodable body. The credential is fine;
    /// safe to surface generically and retry later.
    #[error("unexpected Stripe response: {0}")]
    InvalidResponse(String),
    /// Transport-level failure (DNS, TLS, reset, timeout). Distinct from
    /// `InvalidResponse`: neither the credential nor the request was wrong.
    #[error("network error talking to Stripe: {0}")]
    NetworkError(#[source] reqwest::Error),
}

pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            client: http_client::new_api_client(),
            secret_key: settings.stripe.secret_key.clone(),
            base_url: settings.stripe.api_base.clone(),
        }
    }

    pub fn with_secret_key(secret_key: String) -> Self {
        Self {
            client: http_client::new_api_client(),
            secret_key,
            base_url: STRIPE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Fetch one page of active subscriptions with discounts expanded, so
    /// aggregation needs no follow-up requests per record.
    #[instrument(skip(self), fields(cursor = starting_after.unwrap_or("-")))]
    pub async fn list_active_subscriptions(
        &self,
        starting_after: Option<&str>,
    ) -> Result<SubscriptionList, StripeError> {
        let url = format!("{}/subscriptions", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("status", "active".to_string()),
            ("limit", PAGE_SIZE.to_string()),
            ("expand[]", "data.discount".to_string()),
        ];
        if let Some(cursor) = starting_after {
            query.push(("starting_after", cursor.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await
            .map_err(StripeError::NetworkError)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(StripeError::Unauthorized);
        }
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response".to_string());
            return Err(StripeError::InvalidResponse(format!(
                "Stripe request failed with status {}: {}",
                status, error_text
            )));
        }

        let body = response.bytes().await.map_err(StripeError::NetworkError)?;

        serde_json::from_slice(&body).map_err(|e| {
            StripeError::InvalidResponse(format!("undecodable subscription page: {}", e))
        })
    }
}
