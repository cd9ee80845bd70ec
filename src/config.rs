use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgument, Result};

/// YIN paper suggests 0.1; 0.2 is friendlier to noisy microphone input.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Settings of a [`PitchEstimator`](crate::PitchEstimator).
///
/// Plain value: the estimator keeps its own copy, so changing a config after
/// construction never affects an estimator built from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Samples per analysis frame. Must be positive and even.
    pub frame_length: usize,
    /// Samples per second.
    pub sample_rate: u32,
    /// CMNDF value below which a lag is accepted as a period candidate.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

impl EstimatorConfig {
    pub fn new(frame_length: usize, sample_rate: u32) -> EstimatorConfig {
        EstimatorConfig {
            frame_length,
            sample_rate,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(self, threshold: f32) -> EstimatorConfig {
        EstimatorConfig { threshold, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_length == 0 || self.frame_length % 2 != 0 {
            return Err(InvalidArgument::FrameLength(self.frame_length));
        }
        if self.sample_rate == 0 {
            return Err(InvalidArgument::SampleRate(self.sample_rate.to_string()));
        }
        // also catches NaN
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(InvalidArgument::Threshold(self.threshold));
        }
        Ok(())
    }

    /// Length of the scratch buffer, i.e. the number of lags examined.
    pub fn window_length(&self) -> usize {
        self.frame_length / 2
    }
}

impl Default for EstimatorConfig {
    fn default() -> EstimatorConfig {
        EstimatorConfig::new(1024, 44100)
    }
}

/// Converts a floating point sample rate (as audio APIs often report it) into
/// the integral rate the estimator works with.
pub fn sample_rate_from_hz(hz: f64) -> Result<u32> {
    if !hz.is_finite() || hz <= 0.0 || hz.fract() != 0.0 || hz > f64::from(u32::MAX) {
        return Err(InvalidArgument::SampleRate(hz.to_string()));
    }
    Ok(hz as u32)
}
