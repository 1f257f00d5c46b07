pub mod client;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

// Client
pub use client::Broker;
pub use config::BrokerConfig;
pub use error::{BrokerError, Result};

// REST client
pub use rest::BrokerHttpClient;

// Core enums
pub use types::{RecordStatus, ReviewAction, TransactionKind};

// Resource collections
pub use types::{Transaction, User};

// Session + acknowledgements
pub use types::{ApiAck, AuthStatus, LoginResponse, SessionUser};

// Registration
pub use types::RegistrationForm;
