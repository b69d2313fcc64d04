use crate::core::VideoId;
use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
    /// The link did not contain an 11-character video identifier.
    #[display("Invalid YouTube URL: {_0}")]
    InvalidUrl(String),

    #[display("Video not found with ID: {_0}")]
    NotFound(VideoId),

    /// Transcript could not be retrieved (captions disabled, no matching language, ...).
    #[display("Error extracting transcript: {_0}")]
    Unavailable(String),

    #[display("Error generating analysis: {_0}")]
    GenerationFailed(String),

    /// Startup only; the process cannot serve requests without both keys.
    #[display("Missing credential: {_0} is not set")]
    MissingCredential(&'static str),

    #[display("{_0}")]
    Custom(String),

    #[from]
    #[display("I/O error: {_0}")]
    Io(std::io::Error),

    #[from]
    #[display("HTTP error: {_0}")]
    Http(reqwest::Error),

    #[from]
    #[display("JSON error: {_0}")]
    Json(serde_json::Error),
}

impl Error {
    pub fn custom(val: impl std::fmt::Display) -> Self {
        Self::Custom(val.to_string())
    }
}

impl std::error::Error for Error {}
