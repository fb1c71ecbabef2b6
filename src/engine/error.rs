use thiserror::Error;

pub type TriviaResult<T> = Result<T, TriviaError>;

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("There was a problem talking to the trivia server")]
    Http(#[from] reqwest::Error),
    #[error("The server answered with HTTP {0}")]
    Status(u16),
    #[error("The server sent malformed JSON")]
    Decode(#[from] serde_json::Error),
    /// `error` field of an otherwise well-formed payload, shown verbatim.
    #[error("{0}")]
    Server(String),
    #[error("No {0} available")]
    NoData(&'static str),
    #[error("The game payload has no answer")]
    MissingAnswer,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    PollFailed(String),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TriviaError {
    /// Local input rejections leave the session untouched.
    pub fn is_validation(&self) -> bool {
        matches!(self, TriviaError::Validation(_))
    }
}
