// A WebSocket service that predicts with and trains a small neural network.
// Every connection gets its own freshly initialized model.
//
// Run with:
//   RUST_LOG=debug cargo run --release
// Then connect a websocket client to ws://localhost:8765 and send e.g.
//   train:0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.3,0.7
//   predict:0.1,0.2,0.3,0.4,0.5,0.6,0.7
//   exit
use env_logger::Env;
use log::info;

use ferrite_socket::{server::shutdown_on_ctrl_c, Server, ServerConfig, ServerError};

fn main() -> Result<(), ServerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;
    let server = Server::bind(&config)?;
    shutdown_on_ctrl_c(server.shutdown_handle())?;

    info!("websocket server started at ws://{}", config.addr());
    server.run();
    Ok(())
}
