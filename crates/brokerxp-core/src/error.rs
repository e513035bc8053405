use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown IANA timezone: {0}")]
    UnknownTimezone(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
