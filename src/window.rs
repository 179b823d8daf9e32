//! Taper (window) coefficients.
//!
//! The kernel builder only depends on the [`WindowProvider`] trait, so callers
//! may plug their own taper source. [`StandardWindows`] covers the usual
//! symmetric tapers (the `sym=True` variants of `scipy.signal.get_window`).
use std::f64::consts::PI;

use crate::config::WindowSpec;
use crate::error::{FilterError, Result};

/// Produces `n` taper coefficients for a [`WindowSpec`].
pub trait WindowProvider {
    fn window(&self, spec: &WindowSpec, n: usize) -> Result<Vec<f64>>;
}

/// Built-in tapers; see [`Window`] for the recognised names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardWindows;

impl WindowProvider for StandardWindows {
    fn window(&self, spec: &WindowSpec, n: usize) -> Result<Vec<f64>> {
        Window::from_spec(spec)?.coefficients(n)
    }
}

/// A resolved taper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    /// All ones (`rect`, `rectangular`, `ones`).
    Boxcar,
    /// Triangle reaching zero at both ends (`triangular`).
    Bartlett,
    /// Raised cosine (`hanning`).
    Hann,
    Hamming,
    Blackman,
    /// Kaiser–Bessel taper. Default `beta = 8.6`.
    Kaiser { beta: f64 },
    /// Gaussian with standard deviation `std` in samples.
    /// Default `(n - 1) / 6`.
    Gaussian { std: Option<f64> },
}

const KAISER_DEFAULT_BETA: f64 = 8.6;

impl Window {
    /// Resolve a spec, rejecting unknown names and unknown parameters.
    pub fn from_spec(spec: &WindowSpec) -> Result<Self> {
        let name = spec.base_name().trim().to_ascii_lowercase();
        let (window, allowed): (Window, &[&str]) = match name.as_str() {
            "boxcar" | "rect" | "rectangular" | "ones" => (Window::Boxcar, &[]),
            "bartlett" | "triangular" => (Window::Bartlett, &[]),
            "hann" | "hanning" => (Window::Hann, &[]),
            "hamming" => (Window::Hamming, &[]),
            "blackman" => (Window::Blackman, &[]),
            "kaiser" => (
                Window::Kaiser { beta: spec.param("beta").unwrap_or(KAISER_DEFAULT_BETA) },
                &["beta"],
            ),
            "gaussian" => (Window::Gaussian { std: spec.param("std") }, &["std"]),
            _ => return Err(FilterError::UnknownWindow(spec.base_name().to_string())),
        };

        if let WindowSpec::Parameterized { params, .. } = spec {
            if let Some(bad) = params.keys().find(|k| !allowed.contains(&k.as_str())) {
                return Err(FilterError::invalid(format!(
                    "window '{name}' has no parameter '{bad}'"
                )));
            }
        }
        match window {
            Window::Kaiser { beta } if beta.is_nan() || beta < 0.0 => Err(FilterError::invalid(format!(
                "kaiser beta must be non-negative, got {beta}"
            ))),
            Window::Kaiser { beta } => kaiser_norm(beta).map(|_| window),
            Window::Gaussian { std: Some(s) } if s.is_nan() || s <= 0.0 => Err(FilterError::invalid(format!(
                "gaussian std must be positive, got {s}"
            ))),
            w => Ok(w),
        }
    }

    /// Symmetric coefficients of length `n`.
    pub fn coefficients(&self, n: usize) -> Result<Vec<f64>> {
        if n == 0 {
            return Err(FilterError::invalid("window length must be positive"));
        }
        if n == 1 {
            return Ok(vec![1.0]);
        }
        let m = (n - 1) as f64;
        let cosine = |a: &[f64]| -> Vec<f64> {
            (0..n)
                .map(|i| {
                    let phase = 2.0 * PI * i as f64 / m;
                    a.iter()
                        .enumerate()
                        .map(|(k, &ak)| {
                            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                            sign * ak * (k as f64 * phase).cos()
                        })
                        .sum()
                })
                .collect()
        };

        let w = match *self {
            Window::Boxcar => vec![1.0; n],
            Window::Bartlett => (0..n)
                .map(|i| 1.0 - (2.0 * i as f64 / m - 1.0).abs())
                .collect(),
            Window::Hann => cosine(&[0.5, 0.5]),
            Window::Hamming => cosine(&[0.54, 0.46]),
            Window::Blackman => cosine(&[0.42, 0.5, 0.08]),
            Window::Kaiser { beta } => {
                let denom = kaiser_norm(beta)?;
                (0..n)
                    .map(|i| {
                        let r = 2.0 * i as f64 / m - 1.0;
                        bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / denom
                    })
                    .collect()
            }
            Window::Gaussian { std } => {
                let sigma = std.unwrap_or(m / 6.0);
                let mid = m / 2.0;
                (0..n)
                    .map(|i| {
                        let z = (i as f64 - mid) / sigma;
                        (-0.5 * z * z).exp()
                    })
                    .collect()
            }
        };
        Ok(w)
    }
}

/// `I0(beta)`, the Kaiser normalisation. Fails once it overflows `f64`
/// (beta beyond roughly 700).
fn kaiser_norm(beta: f64) -> Result<f64> {
    let denom = bessel_i0(beta);
    if denom.is_finite() {
        Ok(denom)
    } else {
        Err(FilterError::invalid(format!(
            "kaiser beta {beta} is too large: I0(beta) overflows"
        )))
    }
}

/// Modified Bessel function of the first kind, order 0 (power series).
fn bessel_i0(x: f64) -> f64 {
    let half_sq = (x / 2.0) * (x / 2.0);
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..2000 {
        term *= half_sq / (k as f64 * k as f64);
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}
