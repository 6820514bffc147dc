use std::fmt;

use crate::{error::RequestError, protocol::{codec, request::PREDICT_TAG}};

pub const GOODBYE: &str = "Goodbye!";
pub const TRAIN_DONE: &str = "Train done";

/// An outbound message; `Display` renders the exact wire text.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Goodbye,
    Prediction(Vec<f64>),
    TrainDone,
    Echo(String),
    Error(String),
}

impl Response {
    /// Whether the connection closes after this response is sent.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Response::Goodbye)
    }
}

impl From<RequestError> for Response {
    fn from(e: RequestError) -> Self {
        Response::Error(e.to_string())
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Goodbye => f.write_str(GOODBYE),
            Response::Prediction(values) => write!(f, "{PREDICT_TAG}{}", codec::encode(values)),
            Response::TrainDone => f.write_str(TRAIN_DONE),
            Response::Echo(message) => write!(f, "Processed message: '{message}'"),
            Response::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    #[test]
    fn renders_wire_text() {
        assert_eq!(Response::Goodbye.to_string(), "Goodbye!");
        assert_eq!(Response::TrainDone.to_string(), "Train done");
        assert_eq!(Response::Prediction(vec![0.5, 1.2]).to_string(), "predict:0.5,1.2");
        assert_eq!(
            Response::Echo("it's <b>&</b>".to_owned()).to_string(),
            "Processed message: 'it's <b>&</b>'"
        );
    }

    #[test]
    fn request_errors_become_error_responses() {
        let resp = Response::from(RequestError::Format(FormatError::ArityMismatch { got: 3, expected: 7 }));
        assert_eq!(resp.to_string(), "error: malformed payload: expected 7 values, got 3");
        assert!(!resp.is_terminal());
    }

    #[test]
    fn only_goodbye_is_terminal() {
        assert!(Response::Goodbye.is_terminal());
        assert!(!Response::TrainDone.is_terminal());
    }
}
