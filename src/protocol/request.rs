pub const EXIT_COMMAND: &str = "exit";
pub const PREDICT_TAG: &str = "predict:";
pub const TRAIN_TAG: &str = "train:";

/// An inbound message, classified by its tag.
///
/// Tags match anywhere in the message, not only as a prefix, and `predict:`
/// wins over `train:` when both appear. The payload is the text after the
/// first occurrence of the winning tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Exit,
    Predict(&'a str),
    Train(&'a str),
    Echo(&'a str),
}

impl<'a> Request<'a> {
    pub fn parse(message: &'a str) -> Request<'a> {
        if message.to_lowercase() == EXIT_COMMAND {
            return Request::Exit;
        }
        if let Some((_, payload)) = message.split_once(PREDICT_TAG) {
            return Request::Predict(payload);
        }
        if let Some((_, payload)) = message.split_once(TRAIN_TAG) {
            return Request::Train(payload);
        }
        Request::Echo(message)
    }
}

#[cfg(test)]
mod tests {
    use super::Request;

    #[test]
    fn exit_is_case_insensitive() {
        for msg in ["exit", "EXIT", "ExIt"] {
            assert_eq!(Request::parse(msg), Request::Exit);
        }
    }

    #[test]
    fn exit_must_match_whole_message() {
        assert_eq!(Request::parse("exit now"), Request::Echo("exit now"));
        assert_eq!(Request::parse(" exit"), Request::Echo(" exit"));
    }

    #[test]
    fn strips_prefix_tags() {
        assert_eq!(Request::parse("predict:1,2"), Request::Predict("1,2"));
        assert_eq!(Request::parse("train:1,2"), Request::Train("1,2"));
    }

    #[test]
    fn tags_match_anywhere() {
        assert_eq!(Request::parse("please train:1,2"), Request::Train("1,2"));
        assert_eq!(Request::parse(">>predict:3"), Request::Predict("3"));
    }

    #[test]
    fn predict_wins_over_train() {
        assert_eq!(Request::parse("train:predict:1"), Request::Predict("1"));
    }

    #[test]
    fn untagged_messages_echo() {
        assert_eq!(Request::parse("hello"), Request::Echo("hello"));
        assert_eq!(Request::parse("predict 1,2"), Request::Echo("predict 1,2"));
        assert_eq!(Request::parse(""), Request::Echo(""));
    }
}
