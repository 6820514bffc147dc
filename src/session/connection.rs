use std::io::{Read, Write};

use log::{debug, info, warn};
use tungstenite::{Error, Message, WebSocket};

use crate::{model::approximator::Approximator, session::session::Session};

/// Drives `session` over `socket` until `exit`, a peer close, or a
/// transport failure. One response is written per inbound data frame.
///
/// Transport failures end the session. They are logged and never
/// propagated, since a dropped client is routine for the server.
pub fn run<S, M>(mut socket: WebSocket<S>, mut session: Session<M>)
where
    S: Read + Write,
    M: Approximator,
{
    loop {
        let response = match socket.read() {
            Ok(Message::Text(text)) => session.handle(&text),
            Ok(Message::Binary(bytes)) => session.handle_bytes(&bytes),
            // Pongs are queued by tungstenite itself.
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
            Ok(Message::Close(frame)) => {
                info!("client {} closed the connection: {frame:?}", session.peer());
                // Sends the close reply tungstenite queued on read.
                if let Err(e) = socket.flush() {
                    debug!("close reply to {} not sent: {e}", session.peer());
                }
                break;
            }
            Err(e) => {
                report_closed(session.peer(), &e);
                break;
            }
        };

        if let Err(e) = socket.send(Message::text(response.to_string())) {
            report_closed(session.peer(), &e);
            break;
        }

        if response.is_terminal() {
            close_handshake(&mut socket, session.peer());
            break;
        }
    }

    session.close();
}

/// Starts a close handshake and drains the socket until the peer answers.
fn close_handshake<S: Read + Write>(socket: &mut WebSocket<S>, peer: &str) {
    if let Err(e) = socket.close(None) {
        report_closed(peer, &e);
        return;
    }
    loop {
        match socket.read() {
            Ok(_) => continue,
            Err(Error::ConnectionClosed) => break,
            Err(e) => {
                debug!("close handshake with {peer} ended early: {e}");
                break;
            }
        }
    }
}

fn report_closed(peer: &str, e: &Error) {
    match e {
        Error::ConnectionClosed | Error::AlreadyClosed => info!("connection to {peer} closed"),
        e => warn!("connection to {peer} closed unexpectedly: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read, Write};

    use tungstenite::protocol::Role;

    use super::*;
    use crate::error::ModelError;

    /// Replays pre-encoded client frames and records what the server writes.
    struct Replay {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Read for Replay {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Replay {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Echoing;

    impl Approximator for Echoing {
        fn input_size(&self) -> usize { 1 }
        fn output_size(&self) -> usize { 1 }
        fn predict(&self, input: &[f64]) -> Result<Vec<f64>, ModelError> { Ok(input.to_vec()) }
        fn fit(&mut self, _: &[f64], _: &[f64]) -> Result<f64, ModelError> { Ok(0.0) }
    }

    /// Encodes `messages` the way a client would send them.
    fn client_frames(messages: &[Message]) -> Vec<u8> {
        let mut client = WebSocket::from_raw_socket(
            Replay { input: Cursor::new(Vec::new()), output: Vec::new() },
            Role::Client,
            None,
        );
        for msg in messages {
            client.send(msg.clone()).unwrap();
        }
        std::mem::take(&mut client.get_mut().output)
    }

    /// Decodes everything the server wrote back into messages.
    fn server_frames(bytes: Vec<u8>) -> Vec<Message> {
        let mut reader = WebSocket::from_raw_socket(
            Replay { input: Cursor::new(bytes), output: Vec::new() },
            Role::Client,
            None,
        );
        let mut out = Vec::new();
        while let Ok(msg) = reader.read() {
            out.push(msg);
        }
        out
    }

    fn serve(messages: &[Message]) -> Vec<Message> {
        let mut stream = Replay { input: Cursor::new(client_frames(messages)), output: Vec::new() };
        run(
            WebSocket::from_raw_socket(&mut stream, Role::Server, None),
            Session::new("replay", Echoing),
        );
        server_frames(stream.output)
    }

    #[test]
    fn answers_each_message_then_says_goodbye() {
        let replies = serve(&[
            Message::text("hello"),
            Message::text("predict:2.5"),
            Message::text("EXIT"),
        ]);
        assert_eq!(replies[0], Message::text("Processed message: 'hello'"));
        assert_eq!(replies[1], Message::text("predict:2.5"));
        assert_eq!(replies[2], Message::text("Goodbye!"));
        assert!(matches!(replies[3], Message::Close(_)));
    }

    #[test]
    fn end_of_stream_ends_session_quietly() {
        let replies = serve(&[Message::text("train:1,2")]);
        assert_eq!(replies, vec![Message::text("Train done")]);
    }

    #[test]
    fn peer_close_is_acknowledged() {
        let replies = serve(&[Message::text("hi"), Message::Close(None)]);
        assert_eq!(replies[0], Message::text("Processed message: 'hi'"));
        assert!(matches!(replies[1], Message::Close(_)));
        assert_eq!(replies.len(), 2);
    }

    #[test]
    fn pings_get_no_protocol_reply() {
        let replies = serve(&[Message::Ping(vec![1]), Message::text("x")]);
        assert!(replies.contains(&Message::Pong(vec![1])));
        assert!(replies.contains(&Message::text("Processed message: 'x'")));
        assert!(!replies.iter().any(|m| matches!(m, Message::Text(t) if t.starts_with("error"))));
    }
}
