//! Error taxonomy for kernel design and convolution.
//!
//! Every failure is reported synchronously to the direct caller. Nothing is
//! retried: the computations are deterministic, so a retry cannot change the
//! outcome.

/// Result type for design and filtering operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while designing or applying an FIR kernel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// A numeric argument is out of range (cutoff outside `(0, 1)`,
    /// `fclo >= fchi`, zero order, empty kernel, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An operation that needs a well-defined centre tap got an even length.
    #[error("kernel length must be odd, got {len}")]
    Parity { len: usize },

    /// Filter type name not in the recognised set.
    #[error("unknown filter type '{0}'")]
    UnknownFilterType(String),

    /// Taper name not known to the window provider.
    #[error("unknown window '{0}'")]
    UnknownWindow(String),

    /// Kernel is longer than the signal it is convolved with.
    #[error("kernel of {kernel} taps is longer than signal of {signal} samples")]
    SizeMismatch { kernel: usize, signal: usize },
}

impl FilterError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FilterError::InvalidParameter(msg.into())
    }
}
