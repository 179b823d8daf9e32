//! FIR kernel design and application.
//!
//! - [`spectral`]: spectral inversion and reversal of a kernel.
//! - [`design`]: windowed-sinc kernels (`ir_sinc`, `firwin`).
//! - [`apply`]: same-size convolution under a boundary policy.
//! - [`response`]: magnitude response of a kernel.

pub mod apply;
pub mod design;
pub mod response;
pub mod spectral;

pub use apply::{convolve, filter, filter_channels, filter_with_kernel, resolve_kernel, KernelSource};
pub use design::{auto_order, firwin, firwin_with, ir_sinc};
pub use response::frequency_response;
pub use spectral::{spectral_invert, spectral_reverse};
