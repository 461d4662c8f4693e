use spacescope_logic::LogicError;
use thiserror::Error;

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Only events flagged as live can be joined.
    #[error("event `{0}` is not live")]
    EventNotLive(String),

    #[error("no live session is open")]
    NoLiveSession,

    #[error(transparent)]
    Logic(#[from] LogicError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
