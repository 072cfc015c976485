//! Record store HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sonicly_core::{
    BillingRecord, PaymentMethod, PaymentMethodId, PaymentMethodPatch, Subscription,
    SubscriptionId, SubscriptionPatch, UserId,
};

use crate::error::ClientError;
use crate::types::{envelope, unwrap_envelope, ApiErrorResponse, HealthResponse};

/// Default record store location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Record store API client.
///
/// Thin, stateless wrapper over the record store's REST endpoints. Cloning is
/// cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RecordStoreClient {
    client: Client,
    base_url: String,
}

impl RecordStoreClient {
    /// Create a new client with default options.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the record store API (e.g., `"http://localhost:3001/api"`)
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base URL {base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are issued against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness check with the client's default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, answers with a
    /// non-success status, or the body is not a health document.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        send(self.client.get(self.url("/health"))).await
    }

    /// Liveness check bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::health`], plus a timeout error when the deadline passes.
    pub async fn health_with_timeout(
        &self,
        timeout: Duration,
    ) -> Result<HealthResponse, ClientError> {
        send(self.client.get(self.url("/health")).timeout(timeout))
            .await
    }

    /// Fetch a user profile. Returns `None` if the store has no such user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_user(&self, user_id: &UserId) -> Result<Option<Value>, ClientError> {
        let request = self.client.get(self.url(&format!("/users/{user_id}")));
        let response = execute(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(response).await.map(Some)
    }

    /// Create or merge a user profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn save_user(&self, user_id: &UserId, profile: &Value) -> Result<Value, ClientError> {
        let request = self
            .client
            .post(self.url(&format!("/users/{user_id}")))
            .json(profile);
        send_enveloped(request, envelope::USER).await
    }

    /// List a user's subscriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn subscriptions(&self, user_id: &UserId) -> Result<Vec<Subscription>, ClientError> {
        send(self.client.get(self.url(&format!("/subscriptions/{user_id}"))))
            .await
    }

    /// Create a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> Result<Subscription, ClientError> {
        let request = self
            .client
            .post(self.url(&format!("/subscriptions/{user_id}")))
            .json(subscription);
        send_enveloped(request, envelope::SUBSCRIPTION).await
    }

    /// Apply a partial update to a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_subscription(
        &self,
        user_id: &UserId,
        subscription_id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .put(self.url(&format!("/subscriptions/{user_id}/{subscription_id}")))
            .json(patch);
        send_unit(request).await
    }

    /// List a user's payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn payment_methods(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PaymentMethod>, ClientError> {
        send(self.client.get(self.url(&format!("/payments/{user_id}"))))
            .await
    }

    /// Add a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_payment_method(
        &self,
        user_id: &UserId,
        method: &PaymentMethod,
    ) -> Result<PaymentMethod, ClientError> {
        let request = self
            .client
            .post(self.url(&format!("/payments/{user_id}")))
            .json(method);
        send_enveloped(request, envelope::PAYMENT).await
    }

    /// Apply a partial update to a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_payment_method(
        &self,
        user_id: &UserId,
        method_id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .put(self.url(&format!("/payments/{user_id}/{method_id}")))
            .json(patch);
        send_unit(request).await
    }

    /// Delete a payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_payment_method(
        &self,
        user_id: &UserId,
        method_id: &PaymentMethodId,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .delete(self.url(&format!("/payments/{user_id}/{method_id}")));
        send_unit(request).await
    }

    /// List a user's billing history as stored (no ordering guarantee).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn billing_history(&self, user_id: &UserId) -> Result<Vec<BillingRecord>, ClientError> {
        send(self.client.get(self.url(&format!("/billing/{user_id}"))))
            .await
    }

    /// Append a billing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_billing_record(
        &self,
        user_id: &UserId,
        record: &BillingRecord,
    ) -> Result<BillingRecord, ClientError> {
        let request = self
            .client
            .post(self.url(&format!("/billing/{user_id}")))
            .json(record);
        send_enveloped(request, envelope::BILLING).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = execute(request).await?;
    decode(response).await
}

async fn send_enveloped<T: DeserializeOwned>(
    request: RequestBuilder,
    field: &str,
) -> Result<T, ClientError> {
    let body: Value = send(request).await?;
    Ok(unwrap_envelope(body, field)?)
}

async fn send_unit(request: RequestBuilder) -> Result<(), ClientError> {
    let response = execute(request).await?;
    check_status(response).await.map(drop)
}

async fn execute(request: RequestBuilder) -> Result<Response, ClientError> {
    request.send().await.map_err(|e| {
        tracing::debug!(error = %e, "record store request failed");
        ClientError::from(e)
    })
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ApiErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_default();

    tracing::debug!(%status, %detail, "record store returned an error");

    if detail.is_empty() {
        Err(ClientError::Unavailable(format!("HTTP {status}")))
    } else {
        Err(ClientError::Unavailable(format!("HTTP {status}: {detail}")))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout (default: 10 seconds).
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = RecordStoreClient::new("http://localhost:3001/api").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = RecordStoreClient::new("http://localhost:3001/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }

    #[test]
    fn rejects_relative_url() {
        let err = RecordStoreClient::new("/api").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = RecordStoreClient::new("ftp://localhost/api").unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(ClientOptions::default().timeout, Duration::from_secs(10));
    }
}
