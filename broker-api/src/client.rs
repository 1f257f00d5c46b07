use crate::config::BrokerConfig;
use crate::error::Result;
use crate::rest::BrokerHttpClient;
use crate::types::*;

/// Main client for the brokerage platform API.
///
/// Owns the HTTP client (and with it the session cookie). Call [`login`]
/// once, then every other call is credentialed.
///
/// [`login`]: Broker::login
#[derive(Debug, Clone)]
pub struct Broker {
    /// Base URL for the API server.
    pub api_url: String,
    /// HTTP client.
    pub http_client: BrokerHttpClient,
}

impl Broker {
    /// Create a new client. No network traffic happens here.
    pub fn new(config: BrokerConfig) -> Result<Self> {
        let http_client = BrokerHttpClient::new(&config.api_url)?;
        Ok(Self {
            api_url: config.api_url,
            http_client,
        })
    }

    // --- REST delegates ---

    /// Check the current session.
    pub async fn check_auth(&self) -> Result<AuthStatus> {
        self.http_client.check_auth().await
    }

    /// Start a session with email + password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.http_client.login(email, password).await
    }

    /// End the current session.
    pub async fn logout(&self) -> Result<ApiAck> {
        self.http_client.logout().await
    }

    /// Submit a new-account KYC application.
    pub async fn register(&self, form: &RegistrationForm) -> Result<ApiAck> {
        self.http_client.register(form).await
    }

    /// Fetch the full user collection.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.http_client.list_users().await
    }

    /// Approve or reject a pending user application.
    pub async fn review_user(&self, id: i64, action: ReviewAction) -> Result<ApiAck> {
        self.http_client.review_user(id, action).await
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.http_client.delete_user(id).await
    }

    /// Fetch the transaction collection.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.http_client.list_transactions().await
    }

    /// Approve or reject a pending money-movement request.
    pub async fn review_transaction(&self, id: i64, action: ReviewAction) -> Result<ApiAck> {
        self.http_client.review_transaction(id, action).await
    }

    /// File a deposit request.
    pub async fn request_deposit(&self, amount: f64) -> Result<ApiAck> {
        self.http_client.request_deposit(amount).await
    }

    /// File a withdrawal request.
    pub async fn request_withdrawal(&self, amount: f64) -> Result<ApiAck> {
        self.http_client.request_withdrawal(amount).await
    }
}
