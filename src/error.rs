use thiserror::Error;

pub const INIT_FAILURE_MESSAGE: &str =
    "The relationship graph could not be displayed because no graphics context is available.";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("graph engine failed to initialize: {reason}")]
    InitializationFailure { reason: String },
}

impl EngineError {
    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::InitializationFailure {
            reason: reason.into(),
        }
    }
}
