//! Synthetic test signals.
//!
//! Frequencies are fractions of the Nyquist frequency, matching the cutoff
//! convention of [`crate::filter`].
use std::f64::consts::PI;

use crate::error::{FilterError, Result};

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Sample times `-(n-1)/2 ..= (n-1)/2`, symmetric about zero.
///
/// Sinusoids sampled on this axis are odd functions and sum to zero.
pub fn symmetric_time(n: usize) -> Vec<f64> {
    let half = n.saturating_sub(1) as f64 / 2.0;
    linspace(-half, half, n)
}

/// `x(t) = Σ_j amps[j] · sin(π · freqs[j] · t)`.
pub fn sinusoids(freqs: &[f64], amps: &[f64], t: &[f64]) -> Result<Vec<f64>> {
    if freqs.len() != amps.len() {
        return Err(FilterError::invalid(format!(
            "{} frequencies but {} amplitudes",
            freqs.len(),
            amps.len()
        )));
    }
    Ok(t.iter()
        .map(|&ti| {
            freqs
                .iter()
                .zip(amps)
                .map(|(&f, &a)| a * (PI * f * ti).sin())
                .sum()
        })
        .collect())
}

/// Unit impulse of length `n` at index `at`.
pub fn impulse(n: usize, at: usize) -> Result<Vec<f64>> {
    if at >= n {
        return Err(FilterError::invalid(format!("impulse index {at} outside length {n}")));
    }
    let mut x = vec![0.0; n];
    x[at] = 1.0;
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linspace_endpoints() {
        let v = linspace(-1.0, 1.0, 5);
        assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
    }

    #[test]
    fn symmetric_sinusoids_are_zero_mean() {
        let t = symmetric_time(1001);
        assert_eq!(t[500], 0.0);
        let x = sinusoids(&[0.01, 0.1, 0.4], &[1.0, 0.1, 0.05], &t).unwrap();
        assert_abs_diff_eq!(x.iter().sum::<f64>(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn mismatched_lengths() {
        assert!(sinusoids(&[0.1, 0.2], &[1.0], &[0.0]).is_err());
    }

    #[test]
    fn impulse_position() {
        assert_eq!(impulse(3, 1).unwrap(), vec![0.0, 1.0, 0.0]);
        assert!(impulse(3, 3).is_err());
    }
}
