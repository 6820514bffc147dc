pub mod config;
pub mod handshake;
pub mod server;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::Server;
pub use shutdown::{shutdown_on_ctrl_c, ShutdownHandle};
