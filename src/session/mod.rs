pub mod connection;
pub mod session;

pub use session::{Session, SessionState};
