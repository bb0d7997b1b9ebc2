use thiserror::Error;

/// Everything that can go wrong while handling one control command. All of
/// these are reported back on the operator's socket; none of them end the
/// session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("malformed payload: {0}")]
    Decode(String),

    #[error("lower third {0} not found")]
    NotFound(i64),

    /// The record is already first (or last) in the rotation; reorder has
    /// nowhere to go. Distinct from the other failures so the caller can
    /// suppress the page reload.
    #[error("already at the limit")]
    AtLimit,

    #[error("invalid message type '{0}'")]
    UnknownCommand(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
