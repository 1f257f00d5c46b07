use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("API error: {0}")]
    Api(#[from] broker_api::BrokerError),

    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("no authenticated session")]
    NotAuthenticated,

    #[error("the approvals console requires an administrator session")]
    AdminRequired,

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("{0} is not set (put it in the environment or a .env file)")]
    MissingCredential(&'static str),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
