//! Stripe REST API client.
//!
//! A thin `reqwest` wrapper: one method per endpoint the facade uses. No
//! retries happen here; a failed call is reported to the caller as-is.

use paybridge_core::{CustomerId, PaymentIntentId};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::error::StripeError;
use super::types::{
    CardTokenParams, Charge, ChargeCreateParams, CustomerCreateParams, ErrorEnvelope,
    StripeCustomer, StripePaymentIntent, Token,
};
use crate::config::StripeConfig;

/// Header carrying the client-supplied idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Header pinning the API version.
const STRIPE_VERSION_HEADER: &str = "stripe-version";

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    /// HTTP client (connection pool, timeout, default headers).
    client: Client,
    /// API base URL without trailing slash.
    api_base: String,
    /// Secret key for bearer authentication.
    secret_key: SecretString,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .field("secret_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new Stripe client.
    ///
    /// # Errors
    ///
    /// Returns error if the API version is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        if let Some(version) = &config.api_version {
            headers.insert(
                STRIPE_VERSION_HEADER,
                HeaderValue::from_str(version)
                    .map_err(|e| StripeError::Config(format!("Invalid API version: {e}")))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("paybridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StripeError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: base_without_slash(&config.api_base),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Create a single-use card token.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Stripe rejects the card.
    #[instrument(skip_all)]
    pub async fn create_card_token(
        &self,
        params: &CardTokenParams<'_>,
        idempotency_key: Option<&str>,
    ) -> Result<Token, StripeError> {
        let token: Token = self.post_form("tokens", params, idempotency_key).await?;
        debug!(
            token_id = %token.id,
            brand = ?token.card.as_ref().and_then(|c| c.brand.as_deref()),
            last4 = ?token.card.as_ref().and_then(|c| c.last4.as_deref()),
            "Card token created"
        );
        Ok(token)
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Stripe returns an error.
    #[instrument(skip_all, fields(email = %params.email))]
    pub async fn create_customer(
        &self,
        params: &CustomerCreateParams<'_>,
        idempotency_key: Option<&str>,
    ) -> Result<StripeCustomer, StripeError> {
        let customer: StripeCustomer = self.post_form("customers", params, idempotency_key).await?;
        debug!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Retrieve a customer by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the customer does not exist.
    #[instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn retrieve_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<StripeCustomer, StripeError> {
        self.get(&resource_path("customers", customer_id.as_str())).await
    }

    /// Create a charge against a customer's default source.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Stripe declines the charge.
    #[instrument(
        skip_all,
        fields(customer = %params.customer, amount = params.amount, currency = %params.currency)
    )]
    pub async fn create_charge(
        &self,
        params: &ChargeCreateParams<'_>,
        idempotency_key: Option<&str>,
    ) -> Result<Charge, StripeError> {
        let charge: Charge = self.post_form("charges", params, idempotency_key).await?;
        debug!(charge_id = %charge.id, status = ?charge.status, "Charge created");
        Ok(charge)
    }

    /// Retrieve a payment intent by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the payment intent does not exist.
    #[instrument(skip_all, fields(payment_intent_id = %payment_intent_id))]
    pub async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &PaymentIntentId,
    ) -> Result<StripePaymentIntent, StripeError> {
        self.get(&resource_path("payment_intents", payment_intent_id.as_str())).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.api_base)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.secret_key.expose_secret())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StripeError> {
        let response = self
            .authorized(self.client.get(self.url(path)))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_form<P, T>(
        &self,
        path: &str,
        params: &P,
        idempotency_key: Option<&str>,
    ) -> Result<T, StripeError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.authorized(self.client.post(self.url(path))).form(params);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_KEY_HEADER, key);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Decode a success body, or turn the error envelope into a `StripeError`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| StripeError::Parse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error)
            .unwrap_or_default();

        let err = StripeError::from_api(status.as_u16(), error);
        warn!(
            status = status.as_u16(),
            error = %err,
            "Stripe API returned an error"
        );
        Err(err)
    }
}

/// Path to a single object, with the id encoded as one path segment.
fn resource_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

fn base_without_slash(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}
