//! Same-size FIR convolution with a boundary policy.
//!
//! Each output sample is aligned with its input sample:
//!
//! ```text
//! y[i] = Σ_k h[k] · ext(i + c - k),   c = (len(h) - 1) / 2
//! ```
//!
//! where `ext` reads past the signal edges according to the
//! [`BoundaryPolicy`]. The signal is padded once, then convolved either by
//! direct summation (short kernels) or by FFT overlap-add. Both paths give the
//! same result up to round-off.
use log::{debug, trace};
use ndarray::{Array2, ArrayView1};
use rustfft::{num_complex::Complex, FftPlanner};

use crate::config::{BoundaryPolicy, FilterSpec};
use crate::error::{FilterError, Result};
use crate::filter::design::firwin;

/// Kernels up to this many taps are convolved directly.
const DIRECT_MAX_TAPS: usize = 64;

/// What to filter with: a ready kernel, or a spec to design one from.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelSource {
    Spec(FilterSpec),
    Kernel(Vec<f64>),
}

impl From<FilterSpec> for KernelSource {
    fn from(spec: FilterSpec) -> Self {
        KernelSource::Spec(spec)
    }
}

impl From<&FilterSpec> for KernelSource {
    fn from(spec: &FilterSpec) -> Self {
        KernelSource::Spec(spec.clone())
    }
}

impl From<Vec<f64>> for KernelSource {
    fn from(h: Vec<f64>) -> Self {
        KernelSource::Kernel(h)
    }
}

impl From<&Vec<f64>> for KernelSource {
    fn from(h: &Vec<f64>) -> Self {
        KernelSource::Kernel(h.clone())
    }
}

impl From<&[f64]> for KernelSource {
    fn from(h: &[f64]) -> Self {
        KernelSource::Kernel(h.to_vec())
    }
}

/// Turn a [`KernelSource`] into taps. An unset spec order becomes
/// `default_order`.
pub fn resolve_kernel(source: KernelSource, default_order: usize) -> Result<Vec<f64>> {
    match source {
        KernelSource::Kernel(h) => Ok(h),
        KernelSource::Spec(spec) => {
            let spec = match spec.order() {
                Some(_) => spec,
                None => spec.with_order(default_order),
            };
            firwin(&spec)
        }
    }
}

/// Filter `x`, designing the kernel first if `source` is a spec.
///
/// A spec without an order gets `N = len(x)`.
///
/// ```
/// use sincfir::{filter, BoundaryPolicy, FilterSpec};
///
/// let x: Vec<f64> = (0..101).map(|i| (i as f64 * 0.3).sin()).collect();
/// let spec = FilterSpec::lowpass(0.1).unwrap().with_order(31);
/// let y = filter(&x, &spec, BoundaryPolicy::Extend).unwrap();
/// assert_eq!(y.len(), x.len());
/// ```
pub fn filter(x: &[f64], source: impl Into<KernelSource>, boundary: BoundaryPolicy) -> Result<Vec<f64>> {
    filter_with_kernel(x, source, boundary).map(|(y, _)| y)
}

/// Like [`filter`], but also returns the kernel that was used.
pub fn filter_with_kernel(
    x: &[f64],
    source: impl Into<KernelSource>,
    boundary: BoundaryPolicy,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let h = resolve_kernel(source.into(), x.len())?;
    let y = convolve(x, &h, boundary)?;
    Ok((y, h))
}

/// Filter every row of `data` (`[C, T]`) with one kernel.
///
/// The kernel is designed once; an unset spec order becomes `T`.
pub fn filter_channels(
    data: &Array2<f64>,
    source: impl Into<KernelSource>,
    boundary: BoundaryPolicy,
) -> Result<Array2<f64>> {
    let h = resolve_kernel(source.into(), data.ncols())?;
    let mut out = Array2::<f64>::zeros(data.dim());
    for (row_in, mut row_out) in data.rows().into_iter().zip(out.rows_mut()) {
        let row: Vec<f64> = row_in.to_vec();
        let filtered = convolve(&row, &h, boundary)?;
        row_out.assign(&ArrayView1::from(&filtered));
    }
    Ok(out)
}

/// Same-size convolution of `x` with `h` under `boundary`.
///
/// Fails if `h` is empty or longer than `x`.
pub fn convolve(x: &[f64], h: &[f64], boundary: BoundaryPolicy) -> Result<Vec<f64>> {
    check_sizes(x.len(), h.len())?;
    let padded = pad(x, h.len(), boundary);
    if h.len() <= DIRECT_MAX_TAPS {
        debug!("convolve: direct, {} taps × {} samples ({boundary})", h.len(), x.len());
        Ok(convolve_direct(&padded, h, x.len()))
    } else {
        debug!("convolve: overlap-add, {} taps × {} samples ({boundary})", h.len(), x.len());
        Ok(convolve_overlap_add(&padded, h, x.len()))
    }
}

fn check_sizes(n_x: usize, n_h: usize) -> Result<()> {
    if n_h == 0 {
        return Err(FilterError::invalid("kernel must not be empty"));
    }
    if n_h > n_x {
        return Err(FilterError::SizeMismatch { kernel: n_h, signal: n_x });
    }
    Ok(())
}

// ── Padding ───────────────────────────────────────────────────────────────────

/// Extend `x` by `n_h - 1 - c` samples on the left and `c` on the right,
/// `c = (n_h - 1) / 2`, so that `valid` convolution of the result with `h`
/// yields exactly `len(x)` centred outputs.
///
/// Requires `1 <= n_h <= len(x)`.
fn pad(x: &[f64], n_h: usize, boundary: BoundaryPolicy) -> Vec<f64> {
    let n = x.len() as isize;
    let c = (n_h - 1) / 2;
    let n_l = (n_h - 1 - c) as isize;
    let n_r = c as isize;

    (-n_l..n + n_r)
        .map(|j| match boundary {
            _ if (0..n).contains(&j) => x[j as usize],
            BoundaryPolicy::Extend => x[j.clamp(0, n - 1) as usize],
            BoundaryPolicy::Truncate => 0.0,
            BoundaryPolicy::Periodic => x[j.rem_euclid(n) as usize],
        })
        .collect()
}

// ── Strategies ────────────────────────────────────────────────────────────────

/// `valid` convolution by direct summation: `y[i] = Σ_k h[k] · p[i + n_h - 1 - k]`.
fn convolve_direct(padded: &[f64], h: &[f64], n_out: usize) -> Vec<f64> {
    let n_h = h.len();
    (0..n_out)
        .map(|i| {
            let window = &padded[i..i + n_h];
            h.iter().zip(window.iter().rev()).map(|(a, b)| a * b).sum()
        })
        .collect()
}

/// `valid` convolution by FFT overlap-add.
///
/// The padded signal is cut into blocks of `n_fft - n_h + 1` samples; each
/// block's linear convolution with `h` is accumulated at the block offset.
fn convolve_overlap_add(padded: &[f64], h: &[f64], n_out: usize) -> Vec<f64> {
    let n_h = h.len();
    let n_p = padded.len();

    let n_fft = choose_fft_len(n_h, n_p);
    let n_seg = n_fft - n_h + 1;
    trace!("overlap-add: n_fft={n_fft} n_seg={n_seg}");

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft_fwd = planner.plan_fft_forward(n_fft);
    let fft_inv = planner.plan_fft_inverse(n_fft);
    let inv_scale = 1.0 / n_fft as f64;

    let mut h_fft = zero_padded(h, n_fft);
    fft_fwd.process(&mut h_fft);

    let mut full = vec![0.0_f64; n_p + n_h - 1];
    for start in (0..n_p).step_by(n_seg) {
        let stop = (start + n_seg).min(n_p);

        let mut buf = zero_padded(&padded[start..stop], n_fft);
        fft_fwd.process(&mut buf);
        for (b, &hf) in buf.iter_mut().zip(h_fft.iter()) {
            *b *= hf;
        }
        fft_inv.process(&mut buf);

        let len = stop - start + n_h - 1;
        for (o, b) in full[start..start + len].iter_mut().zip(buf.iter()) {
            *o += b.re * inv_scale;
        }
    }

    full[n_h - 1..n_h - 1 + n_out].to_vec()
}

/// Pick the power-of-two FFT length minimising the overlap-add operation count:
///   `cost = ceil(n_x / (N - n_h + 1)) * N * (log2(N) + 1) + 4e-5 * N * n_x`
fn choose_fft_len(n_h: usize, n_x: usize) -> usize {
    let min_fft = 2 * n_h - 1;
    let min_pow = (min_fft as f64).log2().ceil() as u32;
    let max_pow = ((n_x as f64).log2().ceil() as u32 + 1).max(min_pow);

    let mut best_n = 1_usize << max_pow;
    let mut best_cost = f64::INFINITY;
    for pow in min_pow..=max_pow {
        let n = 1_usize << pow;
        if n < min_fft {
            continue;
        }
        let n_seg = (n - n_h + 1) as f64;
        let cost = (n_x as f64 / n_seg).ceil() * n as f64 * (pow as f64 + 1.0)
            + 4e-5 * n as f64 * n_x as f64;
        if cost < best_cost {
            best_cost = cost;
            best_n = n;
        }
    }
    best_n
}

fn zero_padded(v: &[f64], n_fft: usize) -> Vec<Complex<f64>> {
    v.iter()
        .map(|&re| Complex { re, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n_fft)
        .collect()
}
