//! Integration test harness for Paybridge.
//!
//! Each test gets its own Paybridge server on an ephemeral port, wired to
//! its own `httpmock` server standing in for the Stripe API. Nothing here
//! talks to the real Stripe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p paybridge-integration-tests
//! ```

use httpmock::MockServer;
use paybridge_server::config::StripeConfig;
use paybridge_server::state::AppState;
use reqwest::Client;
use secrecy::SecretString;
use url::Url;

/// Test-mode key shaped like a real one. Only ever sent to the mock server.
pub const TEST_SECRET_KEY: &str = "sk_test_51Hq8aB3xY9mK2nL5pQ7rT0uW4zC6dE";

/// A running Paybridge server and the mock Stripe API behind it.
pub struct TestApp {
    /// Base URL of the Paybridge server, without trailing slash.
    pub base_url: String,
    /// HTTP client for calling the server.
    pub client: Client,
    /// Mock Stripe API the server forwards to.
    pub stripe: MockServer,
}

impl TestApp {
    /// Start a mock Stripe API and a Paybridge server pointed at it.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be bound or configured.
    pub async fn spawn() -> Self {
        let stripe = MockServer::start_async().await;

        let config = StripeConfig::new(
            SecretString::from(TEST_SECRET_KEY),
            Url::parse(&stripe.base_url()).expect("mock server URL is valid"),
        );
        let state = AppState::new(&config).expect("Failed to build application state");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has a local address");

        tokio::spawn(async move {
            axum::serve(listener, paybridge_server::app(state))
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            stripe,
        }
    }

    /// Absolute URL for a path on the Paybridge server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
