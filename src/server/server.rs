use std::{net::SocketAddr, sync::Arc, thread};

use log::{info, warn};
use tiny_http::Request;
use tungstenite::{protocol::Role, WebSocket};

use crate::{
    error::ServerError,
    model::{approximator::Approximator, reward_model::RewardModel},
    server::{
        config::ServerConfig,
        handshake::{self, Upgrade},
        shutdown::ShutdownHandle,
    },
    session::{connection, session::Session},
};

/// Accepts WebSocket connections and runs one independent session per
/// connection.
pub struct Server {
    http: Arc<tiny_http::Server>,
    addr: SocketAddr,
}

impl Server {
    pub fn bind(config: &ServerConfig) -> Result<Server, ServerError> {
        let addr = config.addr();
        let http = tiny_http::Server::http(addr.as_str()).map_err(|e| ServerError::Bind {
            addr: addr.clone(),
            reason: e.to_string(),
        })?;
        let local = http.server_addr().to_ip().ok_or_else(|| ServerError::Bind {
            addr,
            reason: "listener has no IP address".to_owned(),
        })?;
        Ok(Server { http: Arc::new(http), addr: local })
    }

    /// The address actually bound; differs from the config when port 0 is used.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle { http: Arc::clone(&self.http) }
    }

    /// Serves `RewardModel` sessions until shut down.
    pub fn run(&self) {
        self.run_with(RewardModel::new);
    }

    /// Serves sessions whose models come from `new_model`, called once per
    /// accepted connection.
    ///
    /// Each connection gets its own thread so a client waiting between
    /// messages never stalls the others. Returns once the `ShutdownHandle`
    /// fires.
    pub fn run_with<M, F>(&self, new_model: F)
    where
        M: Approximator + Send + 'static,
        F: Fn() -> M,
    {
        for request in self.http.incoming_requests() {
            let peer = request
                .remote_addr()
                .map_or_else(|| "unknown".to_owned(), |a| a.to_string());

            match handshake::classify(&request) {
                Upgrade::Accept(key) => {
                    let model = new_model();
                    let spawned = thread::Builder::new()
                        .name(format!("session-{peer}"))
                        .spawn(move || serve_connection(request, key, peer, model));
                    if let Err(e) = spawned {
                        warn!("could not start session thread: {e}");
                    }
                }
                Upgrade::Reject(reason) => {
                    warn!("rejected request from {peer} for {}: {reason}", request.url());
                    if let Err(e) = request.respond(handshake::upgrade_required(reason)) {
                        warn!("could not answer {peer}: {e}");
                    }
                }
            }
        }
        info!("server is shutting down");
    }
}

fn serve_connection<M: Approximator>(request: Request, key: String, peer: String, model: M) {
    let stream = request.upgrade("websocket", handshake::switching_protocols(&key));
    let socket = WebSocket::from_raw_socket(stream, Role::Server, None);
    connection::run(socket, Session::new(peer, model));
}
