pub mod auth;
pub mod enums;
pub mod transaction;
pub mod user;

pub use auth::{ApiAck, AuthStatus, LoginResponse, SessionUser};
pub use enums::{RecordStatus, ReviewAction, TransactionKind};
pub use transaction::Transaction;
pub use user::{RegistrationForm, User};
