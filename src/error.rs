use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the pipeline. Remote-call stages never retry; the
/// first error aborts the invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The persisted conversation history exists but is not a valid turn list.
    #[error("malformed conversation store: {0}")]
    MalformedStore(#[source] serde_json::Error),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("reply generation failed: {0}")]
    Generation(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
