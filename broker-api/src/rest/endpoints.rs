use serde_json::json;

use crate::error::{BrokerError, Result};
use crate::rest::BrokerHttpClient;
use crate::types::*;

impl BrokerHttpClient {
    // --- Session ---

    /// GET /api/check-auth - Current session status.
    ///
    /// The server answers 401 with `{"authenticated": false}` when no session
    /// exists; that is a normal answer here, not an error.
    pub async fn check_auth(&self) -> Result<AuthStatus> {
        match self.get("/api/check-auth").await {
            Ok(status) => Ok(status),
            Err(BrokerError::Api { status: 401, .. }) => Ok(AuthStatus::unauthenticated()),
            Err(e) => Err(e),
        }
    }

    /// POST /api/login - Start a session.
    ///
    /// The server reads the email from a `username` field.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.post_json(
            "/api/login",
            &json!({ "username": email, "password": password }),
        )
        .await
    }

    /// POST /api/logout - End the current session.
    pub async fn logout(&self) -> Result<ApiAck> {
        self.post("/api/logout").await
    }

    /// POST /api/register - Submit a KYC application for review.
    pub async fn register(&self, form: &RegistrationForm) -> Result<ApiAck> {
        self.post_json("/api/register", form).await
    }

    // --- Users ---

    /// GET /api/users - Full user collection (admin only).
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/api/users").await
    }

    /// POST /api/users/{id}/{approve|reject} - Decide a pending application.
    pub async fn review_user(&self, id: i64, action: ReviewAction) -> Result<ApiAck> {
        self.post(&format!("/api/users/{id}/{action}")).await
    }

    /// DELETE /api/users/{id} - Remove a user outright.
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/users/{id}")).await
    }

    // --- Transactions ---

    /// GET /api/transactions - All transactions for admins, own history
    /// otherwise.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/api/transactions").await
    }

    /// POST /api/transactions/{id}/{approve|reject} - Decide a pending
    /// money-movement request.
    pub async fn review_transaction(&self, id: i64, action: ReviewAction) -> Result<ApiAck> {
        self.post(&format!("/api/transactions/{id}/{action}")).await
    }

    // --- Money movement ---

    /// POST /api/deposit - File a deposit request for review.
    pub async fn request_deposit(&self, amount: f64) -> Result<ApiAck> {
        Self::check_amount(amount)?;
        self.post_json("/api/deposit", &json!({ "amount": amount }))
            .await
    }

    /// POST /api/withdraw - File a withdrawal request for review.
    pub async fn request_withdrawal(&self, amount: f64) -> Result<ApiAck> {
        Self::check_amount(amount)?;
        self.post_json("/api/withdraw", &json!({ "amount": amount }))
            .await
    }

    fn check_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(BrokerError::Validation(format!(
                "amount must be positive, got {amount}"
            )));
        }
        Ok(())
    }
}
