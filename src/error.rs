pub type LumiseqResult<T> = Result<T, LumiseqError>;

#[derive(thiserror::Error, Debug)]
pub enum LumiseqError {
    #[error("frame spacing error: {prev} and {next} are closer than {min} frame units")]
    FrameSpacing { prev: f64, next: f64, min: f64 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported generator type: {0}")]
    UnsupportedGenerator(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumiseqError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported_generator(name: impl Into<String>) -> Self {
        Self::UnsupportedGenerator(name.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
