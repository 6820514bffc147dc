use log::{debug, info, warn};

use crate::{
    error::RequestError,
    model::approximator::Approximator,
    protocol::{codec, request::Request, response::Response},
};

/// Lifecycle of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMessage,
    Processing,
    Closed,
}

/// One client connection and the model it exclusively owns.
///
/// The model lives exactly as long as the session; dropping the session
/// releases it and logs the disconnect.
pub struct Session<M: Approximator> {
    peer: String,
    model: M,
    state: SessionState,
    handled: usize,
}

impl<M: Approximator> Session<M> {
    pub fn new(peer: impl Into<String>, model: M) -> Session<M> {
        let peer = peer.into();
        info!("client connected from {peer}");
        Session { peer, model, state: SessionState::AwaitingMessage, handled: 0 }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Number of messages answered so far.
    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Handles one inbound text message and returns the single response.
    ///
    /// Failures become `Response::Error` and leave the session awaiting the
    /// next message. After `exit` the session is `Closed` and keeps
    /// answering `Goodbye!`.
    pub fn handle(&mut self, message: &str) -> Response {
        if self.state == SessionState::Closed {
            return Response::Goodbye;
        }
        debug!("< {message}");
        self.state = SessionState::Processing;

        let response = match self.dispatch(Request::parse(message)) {
            Ok(response) => response,
            Err(e) => {
                warn!("request from {} failed: {e}", self.peer);
                Response::from(e)
            }
        };

        self.state = if response.is_terminal() {
            info!("client {} sent 'exit', closing connection", self.peer);
            SessionState::Closed
        } else {
            SessionState::AwaitingMessage
        };
        self.handled += 1;
        debug!("> {response}");
        response
    }

    /// Handles a binary frame as UTF-8 text.
    pub fn handle_bytes(&mut self, bytes: &[u8]) -> Response {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.handle(text),
            Err(_) => {
                warn!("request from {} failed: {}", self.peer, RequestError::NotText);
                self.handled += 1;
                Response::from(RequestError::NotText)
            }
        }
    }

    /// Marks the session closed without an `exit`, e.g. on peer disconnect.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    fn dispatch(&mut self, request: Request<'_>) -> Result<Response, RequestError> {
        match request {
            Request::Exit => Ok(Response::Goodbye),
            Request::Predict(payload) => {
                let input = codec::decode(payload, self.model.input_size())?;
                Ok(Response::Prediction(self.model.predict(&input)?))
            }
            Request::Train(payload) => {
                let input_len = self.model.input_size();
                let sample = codec::decode(payload, input_len + self.model.output_size())?;
                let (input, target) = codec::split_sample(&sample, input_len);
                self.model.fit(input, target)?;
                Ok(Response::TrainDone)
            }
            Request::Echo(message) => Ok(Response::Echo(message.to_owned())),
        }
    }
}

impl<M: Approximator> Drop for Session<M> {
    fn drop(&mut self) {
        self.state = SessionState::Closed;
        info!("client from {} disconnected after {} messages", self.peer, self.handled);
    }
}
