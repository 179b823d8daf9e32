//! Kernel-to-kernel transforms that mirror the frequency response.
//!
//! Neither transform needs the signal: both act on the taps alone, and both
//! are their own inverse.
use crate::error::{FilterError, Result};

/// Spectral inversion: `h' = δ[n - mid] - h`, so `H'(f) = 1 - H(f)`.
///
/// Turns a lowpass into the complementary highpass (and back). The kernel
/// must have odd length so the delta lands on a single centre tap.
pub fn spectral_invert(kernel: &[f64]) -> Result<Vec<f64>> {
    let n = kernel.len();
    if n % 2 == 0 {
        return Err(FilterError::Parity { len: n });
    }
    let mut h: Vec<f64> = kernel.iter().map(|&v| -v).collect();
    h[(n - 1) / 2] += 1.0;
    Ok(h)
}

/// Spectral reversal: negate every odd-indexed tap.
///
/// Multiplying by `(-1)^n` shifts the response by half the sampling rate,
/// mirroring it about half-Nyquist.
pub fn spectral_reverse(kernel: &[f64]) -> Vec<f64> {
    kernel
        .iter()
        .enumerate()
        .map(|(i, &v)| if i % 2 == 1 { -v } else { v })
        .collect()
}
