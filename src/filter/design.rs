//! Windowed-sinc FIR kernel design.
//!
//! All cutoffs are fractions of the Nyquist frequency, in `(0, 1)`.
//!
//!   • lowpass  = sinc(fc) · window
//!   • highpass = spectral inversion of the lowpass
//!   • bandstop = lowpass(fclo) + highpass(fchi)
//!   • bandpass = spectral inversion of the bandstop
use std::f64::consts::PI;

use log::debug;

use crate::config::{FilterSpec, Response};
use crate::error::{FilterError, Result};
use crate::filter::spectral::spectral_invert;
use crate::window::{StandardWindows, WindowProvider};

/// Ideal lowpass impulse response truncated to `n` taps.
///
/// `h[i] = sin(π·fc·x) / (π·x)` with `x = i - (n-1)/2`. The tap at
/// `mid = n/2` is assigned the `x → 0` limit `fc` directly, whatever the parity
/// of `n`; for odd `n` it is the tap sitting on the singularity.
pub fn ir_sinc(f_cut: f64, n: usize) -> Result<Vec<f64>> {
    if !(f_cut > 0.0 && f_cut < 1.0) {
        return Err(FilterError::invalid(format!(
            "cutoff must lie strictly between 0 and 1, got {f_cut}"
        )));
    }
    if n == 0 {
        return Err(FilterError::invalid("kernel order must be positive"));
    }
    let alpha = (n - 1) as f64 / 2.0;
    let c = PI * f_cut;

    let mid = n / 2;
    Ok((0..n)
        .map(|i| {
            if i == mid {
                // lim_{x→0} sin(c·x) / (π·x) = c / π = f_cut
                return f_cut;
            }
            let x = i as f64 - alpha;
            (c * x).sin() / (PI * x)
        })
        .collect())
}

/// Design the kernel described by `spec` using the built-in tapers.
///
/// The spec's order must be set; see [`FilterSpec::with_order`].
pub fn firwin(spec: &FilterSpec) -> Result<Vec<f64>> {
    firwin_with(spec, &StandardWindows)
}

/// [`firwin`] with a caller-supplied taper source.
pub fn firwin_with<W: WindowProvider + ?Sized>(spec: &FilterSpec, windows: &W) -> Result<Vec<f64>> {
    let n = spec
        .order()
        .ok_or_else(|| FilterError::invalid("kernel order must be positive (order is unset)"))?;
    let win = windows.window(spec.window_spec(), n)?;
    if win.len() != n {
        return Err(FilterError::invalid(format!(
            "window provider returned {} coefficients, expected {n}",
            win.len()
        )));
    }
    debug!("firwin: {} N={n} window={}", spec.kind(), spec.window_spec());

    let windowed = |fc: f64| -> Result<Vec<f64>> {
        Ok(ir_sinc(fc, n)?.iter().zip(&win).map(|(s, w)| s * w).collect())
    };
    // Lowpass at fclo plus highpass at fchi: passes everything but the band.
    let band_reject = |fclo: f64, fchi: f64| -> Result<Vec<f64>> {
        let fir1 = windowed(fclo)?;
        let fir2 = spectral_invert(&windowed(fchi)?)?;
        Ok(fir1.iter().zip(&fir2).map(|(a, b)| a + b).collect())
    };

    match spec.response() {
        Response::Window => {
            let s: f64 = win.iter().sum();
            if s == 0.0 {
                return Err(FilterError::invalid("window sums to zero and cannot be normalised"));
            }
            Ok(win.iter().map(|v| v / s).collect())
        }
        Response::Lowpass { fc } => windowed(fc),
        Response::Highpass { fc } => spectral_invert(&windowed(fc)?),
        Response::Bandpass { fclo, fchi } => spectral_invert(&band_reject(fclo, fchi)?),
        Response::Bandstop { fclo, fchi } => band_reject(fclo, fchi),
    }
}

/// Number of taps for a Hamming-windowed design with transition bandwidth
/// `trans_bw` (fraction of Nyquist). Always odd, so every filter type can use it.
///
/// Formula: `ceil(3.3 / (trans_bw / 2))` rounded up to odd.
pub fn auto_order(trans_bw: f64) -> Result<usize> {
    if !(trans_bw > 0.0 && trans_bw < 1.0) {
        return Err(FilterError::invalid(format!(
            "transition bandwidth must lie strictly between 0 and 1, got {trans_bw}"
        )));
    }
    // Δf in cycles/sample is trans_bw / 2.
    let n_raw = (3.3 * 2.0 / trans_bw).ceil() as usize;
    Ok(if n_raw % 2 == 0 { n_raw + 1 } else { n_raw })
}
