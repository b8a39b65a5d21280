use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid calendar date `{input}`: expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown hierarchy node: {0}")]
    UnknownNode(usize),
}
