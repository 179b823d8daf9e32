//! # sincfir — windowed-sinc FIR filters in pure Rust
//!
//! `sincfir` designs one-dimensional FIR kernels from windowed sinc functions
//! and applies them to signals by same-size convolution.
//!
//! ## Kernel algebra
//!
//! ```text
//! ir_sinc(fc, N) · window            lowpass
//! spectral_invert(lowpass)           highpass      H' = 1 − H
//! lowpass(fclo) + highpass(fchi)     bandstop
//! spectral_invert(bandstop)          bandpass
//! window / Σ window                  moving average
//! ```
//!
//! All cutoffs are fractions of the Nyquist frequency in `(0, 1)`. Anything
//! built with `spectral_invert` needs an odd number of taps.
//!
//! ## Quick start
//!
//! ```
//! use sincfir::{filter, BoundaryPolicy, FilterSpec};
//! use sincfir::signal::{sinusoids, symmetric_time};
//!
//! let t = symmetric_time(1001);
//! let x = sinusoids(&[0.01, 0.1, 0.4], &[1.0, 0.1, 0.05], &t).unwrap();
//!
//! // Order left unset: the kernel gets as many taps as the signal.
//! let lp = filter(&x, FilterSpec::lowpass(0.05).unwrap(), BoundaryPolicy::Extend).unwrap();
//! let hp = filter(&x, FilterSpec::highpass(0.05).unwrap(), BoundaryPolicy::Extend).unwrap();
//!
//! for i in 0..x.len() {
//!     assert!((x[i] - lp[i] - hp[i]).abs() < 1e-10);
//! }
//! ```
//!
//! ## Building kernels directly
//!
//! ```
//! use sincfir::{firwin, spectral_reverse, FilterSpec, WindowSpec};
//!
//! let spec = FilterSpec::bandpass(0.05, 0.15)
//!     .unwrap()
//!     .with_order(101)
//!     .with_window(WindowSpec::with_params("kaiser", [("beta", 6.0)]));
//! let h = firwin(&spec).unwrap();
//! assert_eq!(h.len(), 101);
//!
//! // Mirror the response about half-Nyquist.
//! let mirrored = spectral_reverse(&h);
//! assert_eq!(spectral_reverse(&mirrored), h);
//! ```
//!
//! Every operation is a pure function returning fresh vectors; kernels can be
//! shared read-only between threads.

pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod signal;
pub mod window;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{BoundaryPolicy, FilterSpec, FilterType, Response, WindowSpec};

// error
pub use error::{FilterError, Result};

// filter — design, transforms, convolution, response
pub use filter::{
    auto_order, firwin, firwin_with, ir_sinc,
    spectral_invert, spectral_reverse,
    convolve, filter, filter_channels, filter_with_kernel, resolve_kernel, KernelSource,
    frequency_response,
};

// window
pub use window::{StandardWindows, Window, WindowProvider};
