pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod error;
pub mod model;
pub mod protocol;
pub mod session;
pub mod server;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::adam::Adam;
pub use error::{FormatError, ModelError, RequestError, ServerError};
pub use model::{Approximator, RewardModel};
pub use protocol::{Request, Response};
pub use session::{Session, SessionState};
pub use server::{Server, ServerConfig, ShutdownHandle};
