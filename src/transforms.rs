/// Fills `cmndf` with the cumulative mean normalized difference of `samples`.
///
/// `cmndf.len()` is the number of lags examined and `samples` must hold at least
/// twice that many values. Lag 0 is fixed at 1. A frame whose early differences
/// are all zero (silence, DC) divides by a zero running total and leaves NaN in
/// the buffer; callers deal with that when turning a lag into a period.
pub fn cumulative_mean_normalized_difference(samples: &[f32], cmndf: &mut [f32]) {
    let window = cmndf.len();
    debug_assert!(samples.len() >= 2 * window);

    if let Some(first) = cmndf.first_mut() {
        *first = 1.0;
    }

    let mut running_total = 0.0;
    for tau in 1..window {
        let difference: f32 = samples[..window].iter()
            .zip(samples[tau..].iter())
            .map(|(x_i, x_j)| (x_i - x_j) * (x_i - x_j))
            .sum();
        running_total += difference;
        cmndf[tau] = difference * (tau as f32 / running_total);
    }
}

/// Picks the candidate lag: the first lag in `[2, len - 1)` that dips under
/// `threshold`, then walked forward to the bottom of that dip.
///
/// Never fails. If nothing dips under the threshold the result is the last lag,
/// `len - 1`, which has no right neighbour to interpolate with.
pub fn absolute_threshold(cmndf: &[f32], threshold: f32) -> usize {
    let max_lag = cmndf.len().saturating_sub(1);
    let mut tau = 2;

    while tau < max_lag && cmndf[tau] >= threshold {
        tau += 1;
    }
    // descend to the local minimum so we don't report the octave above
    while tau < max_lag && cmndf[tau + 1] < cmndf[tau] {
        tau += 1;
    }

    tau
}

/// Refines `tau` to the vertex of the parabola through its two neighbours.
///
/// `None` when `tau` sits on either edge of `cmndf`. A flat neighbourhood
/// (zero curvature) returns `tau` unchanged.
pub fn parabolic_interpolation(cmndf: &[f32], tau: usize) -> Option<f32> {
    if tau == 0 || tau + 1 >= cmndf.len() {
        return None;
    }

    let (before, at, after) = (cmndf[tau - 1], cmndf[tau], cmndf[tau + 1]);
    let delta = before - after;
    let den = after - 2.0 * at + before;

    if den == 0.0 {
        Some(tau as f32)
    }
    else {
        Some(tau as f32 + delta / (2.0 * den))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const SAMPLE_RATE: f32 = 44100.0;
    const FRAMES: usize = 1024;

    fn sample_sinusoid(amplitude: f32, frequency: f32) -> Vec<f32> {
        (0..FRAMES)
            .map(|x| {
                let t = x as f32 / SAMPLE_RATE;
                (2.0 * PI * frequency * t).sin() * amplitude
            }).collect()
    }

    fn cmndf_of(samples: &[f32]) -> Vec<f32> {
        let mut cmndf = vec![0.0; samples.len() / 2];
        cumulative_mean_normalized_difference(samples, &mut cmndf);
        cmndf
    }

    #[test]
    fn first_lag_is_always_one() {
        assert_eq!(cmndf_of(&sample_sinusoid(1.0, 440.0))[0], 1.0);
        assert_eq!(cmndf_of(&vec![0.0; FRAMES])[0], 1.0);
        assert_eq!(cmndf_of(&vec![0.25; 4])[0], 1.0);
    }

    #[test]
    fn lag_one_normalizes_to_one() {
        // with a single difference the running mean is the difference itself
        let cmndf = cmndf_of(&sample_sinusoid(0.5, 440.0));
        assert!((cmndf[1] - 1.0).abs() < 1e-6, "cmndf[1]={}", cmndf[1]);
    }

    #[test]
    fn silence_propagates_nan() {
        let cmndf = cmndf_of(&vec![0.0; 16]);
        assert_eq!(cmndf[0], 1.0);
        assert!(cmndf[1..].iter().all(|c| c.is_nan()));
    }

    #[test]
    fn sine_dips_at_its_period() {
        // 44100 / 441 = 100 samples per period
        let cmndf = cmndf_of(&sample_sinusoid(1.0, 441.0));
        assert!(cmndf[100] < 0.01, "cmndf[100]={}", cmndf[100]);
        assert!(cmndf[50] > 1.0, "cmndf[50]={}", cmndf[50]);
    }

    #[test]
    fn threshold_walks_down_to_the_local_minimum() {
        let cmndf = vec![1.0, 1.0, 0.9, 0.5, 0.15, 0.1, 0.05, 0.2, 0.7, 0.9];
        assert_eq!(absolute_threshold(&cmndf, 0.2), 6);
    }

    #[test]
    fn threshold_search_is_exclusive_of_the_last_lag() {
        let cmndf = vec![1.0, 1.0, 0.9, 0.8, 0.7, 0.6];
        assert_eq!(absolute_threshold(&cmndf, 0.2), 5);
        assert_eq!(parabolic_interpolation(&cmndf, 5), None);
    }

    #[test]
    fn threshold_search_on_tiny_buffers_starts_at_two() {
        assert_eq!(absolute_threshold(&[1.0, 0.0], 0.2), 2);
        assert_eq!(absolute_threshold(&[], 0.2), 2);
        assert_eq!(parabolic_interpolation(&[1.0, 0.0], 2), None);
    }

    #[test]
    fn nan_stops_the_threshold_search() {
        let cmndf = vec![1.0, f32::NAN, f32::NAN, f32::NAN, f32::NAN];
        assert_eq!(absolute_threshold(&cmndf, 0.2), 2);
    }

    #[test]
    fn interpolate_symmetric_minimum() {
        assert_eq!(parabolic_interpolation(&[1.0, 0.5, 0.0, 0.5], 2), Some(2.0));
    }

    #[test]
    fn interpolate_flat_neighbourhood() {
        assert_eq!(parabolic_interpolation(&[1.0, 0.3, 0.3, 0.3], 2), Some(2.0));
    }

    #[test]
    fn interpolate_finds_parabola_vertex() {
        let cmndf: Vec<f32> = (0..10)
            .map(|i| {
                let x = i as f32 - 5.3;
                x * x
            }).collect();
        let refined = parabolic_interpolation(&cmndf, 5).expect("tau 5 has neighbours");
        assert!((refined - 5.3).abs() < 1e-4, "refined={}", refined);
    }
}
