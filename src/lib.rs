//! Per-frame fundamental frequency estimation with the YIN algorithm.
//!
//! A [`PitchEstimator`] is built once for a frame length and sample rate, then fed
//! one frame at a time. Each frame goes through three steps, all in [`transforms`]:
//! the cumulative mean normalized difference over half the frame's lags, an
//! absolute threshold search that settles on the bottom of the first dip, and
//! parabolic interpolation of that lag to sub-sample precision.

pub mod config;
pub mod error;
pub mod estimator;
pub mod pitch;
pub mod transforms;

pub use config::{sample_rate_from_hz, EstimatorConfig, DEFAULT_THRESHOLD};
pub use error::{InvalidArgument, Result};
pub use estimator::{PitchEstimator, NO_PITCH};
pub use pitch::Pitch;
