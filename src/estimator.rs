use tracing::{debug, trace};

use crate::config::EstimatorConfig;
use crate::error::{InvalidArgument, Result};
use crate::pitch::Pitch;
use crate::transforms;

/// Returned by [`PitchEstimator::estimate_pitch`] when the frame has no detectable period.
pub const NO_PITCH: f32 = -1.0;

/// YIN fundamental frequency estimator for frames of a fixed length.
///
/// The configuration is fixed at construction. The only state that changes between
/// calls is a scratch buffer of `frame_length / 2` lags which every call overwrites
/// before reading, so results depend on nothing but the frame passed in. Estimation
/// needs `&mut self`: share an estimator between threads behind a lock, or give each
/// thread its own.
///
/// ```
/// use rusty_yin::PitchEstimator;
///
/// let mut estimator = PitchEstimator::new(1024, 44100).unwrap();
/// let frame: Vec<f32> = (0..1024)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
///     .collect();
///
/// let hz = estimator.estimate_pitch(&frame).unwrap();
/// assert!((hz - 440.0).abs() < 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct PitchEstimator {
    config: EstimatorConfig,
    cmndf: Vec<f32>
}

impl PitchEstimator {
    /// Estimator with the default threshold of 0.2.
    pub fn new(frame_length: usize, sample_rate: u32) -> Result<PitchEstimator> {
        PitchEstimator::from_config(EstimatorConfig::new(frame_length, sample_rate))
    }

    pub fn with_threshold(frame_length: usize, sample_rate: u32, threshold: f32) -> Result<PitchEstimator> {
        PitchEstimator::from_config(EstimatorConfig::new(frame_length, sample_rate).with_threshold(threshold))
    }

    pub fn from_config(config: EstimatorConfig) -> Result<PitchEstimator> {
        config.validate()?;
        debug!(
            frame_length = config.frame_length,
            sample_rate = config.sample_rate,
            threshold = config.threshold,
            "created pitch estimator"
        );

        Ok(PitchEstimator {
            config,
            cmndf: vec![0.0; config.window_length()]
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// The cumulative mean normalized difference computed by the most recent
    /// estimation, indexed by lag. Contents are unspecified before the first call.
    pub fn normalized_difference(&self) -> &[f32] {
        &self.cmndf
    }

    /// Fundamental frequency of `samples` in Hz, or [`NO_PITCH`].
    pub fn estimate_pitch(&mut self, samples: &[f32]) -> Result<f32> {
        let pitch = self.find_pitch(samples)?;
        Ok(pitch.map_or(NO_PITCH, |p| p.hz))
    }

    /// Same as [`estimate_pitch`](Self::estimate_pitch) with `None` in place of the sentinel.
    pub fn find_pitch(&mut self, samples: &[f32]) -> Result<Option<Pitch>> {
        if samples.len() != self.config.frame_length {
            return Err(InvalidArgument::SampleCount {
                expected: self.config.frame_length,
                actual: samples.len()
            });
        }

        transforms::cumulative_mean_normalized_difference(samples, &mut self.cmndf);
        let tau = transforms::absolute_threshold(&self.cmndf, self.config.threshold);

        let period = match transforms::parabolic_interpolation(&self.cmndf, tau) {
            Some(period) => period,
            None => {
                debug!(tau, "no lag dipped under the threshold");
                return Ok(None);
            }
        };
        trace!(tau, period, "refined period");

        // silent frames leave NaN in the difference buffer
        if !period.is_finite() || period <= 0.0 {
            debug!(tau, period, "period is not usable");
            return Ok(None);
        }

        Ok(Some(Pitch::new(self.config.sample_rate as f32 / period)))
    }
}
