use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvalidArgument>;

/// A caller broke one of the estimator's preconditions.
///
/// This is the only error the crate produces. Valid input always yields either a
/// frequency or [`NO_PITCH`](crate::NO_PITCH).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("frame length must be a positive even number of samples but '{0}' was given")]
    FrameLength(usize),

    #[error("sample rate must be a positive integer that fits in 32 bits but '{0}' was given")]
    SampleRate(String),

    #[error("threshold must lie strictly between 0 and 1 but '{0}' was given")]
    Threshold(f32),

    #[error("expected a frame of {expected} samples but got {actual}")]
    SampleCount { expected: usize, actual: usize },
}
