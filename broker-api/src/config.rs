/// Configuration for the broker client.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Base URL of the brokerage API server (e.g. `http://localhost:5000`).
    pub api_url: String,
}
