//! Filter configuration.
//!
//! [`FilterSpec`] holds every parameter needed to design a kernel. It is only
//! constructible through validating constructors, so a spec that exists is a
//! spec whose cutoffs are in range. The kernel order is the one field that may
//! stay unset until the signal length is known (see [`crate::filter::filter`]).
//!
//! [`WindowSpec`] names the taper and [`BoundaryPolicy`] selects how
//! convolution treats samples past the signal edges.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, Result};

// ── Filter type ───────────────────────────────────────────────────────────────

/// The recognised kernel families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
    /// Also accepted as `bandreject` or `notch`.
    Bandstop,
    /// The bare taper, normalised to unit sum (moving-average style).
    Window,
}

impl FilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Lowpass => "lowpass",
            FilterType::Highpass => "highpass",
            FilterType::Bandpass => "bandpass",
            FilterType::Bandstop => "bandstop",
            FilterType::Window => "window",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowpass" | "low" => Ok(FilterType::Lowpass),
            "highpass" | "high" => Ok(FilterType::Highpass),
            "bandpass" => Ok(FilterType::Bandpass),
            "bandstop" | "bandreject" | "notch" => Ok(FilterType::Bandstop),
            "window" => Ok(FilterType::Window),
            _ => Err(FilterError::UnknownFilterType(s.to_string())),
        }
    }
}

// ── Frequency response selection ──────────────────────────────────────────────

/// Filter type together with the cutoffs it needs.
///
/// Cutoffs are fractions of the Nyquist frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    Window,
    Lowpass { fc: f64 },
    Highpass { fc: f64 },
    Bandpass { fclo: f64, fchi: f64 },
    Bandstop { fclo: f64, fchi: f64 },
}

impl Response {
    pub fn kind(&self) -> FilterType {
        match self {
            Response::Window => FilterType::Window,
            Response::Lowpass { .. } => FilterType::Lowpass,
            Response::Highpass { .. } => FilterType::Highpass,
            Response::Bandpass { .. } => FilterType::Bandpass,
            Response::Bandstop { .. } => FilterType::Bandstop,
        }
    }
}

fn check_cutoff(name: &str, f: f64) -> Result<f64> {
    if f > 0.0 && f < 1.0 {
        Ok(f)
    } else {
        Err(FilterError::invalid(format!(
            "{name} must lie strictly between 0 and 1 (fraction of Nyquist), got {f}"
        )))
    }
}

fn check_band(fclo: f64, fchi: f64) -> Result<(f64, f64)> {
    let fclo = check_cutoff("fclo", fclo)?;
    let fchi = check_cutoff("fchi", fchi)?;
    if fclo >= fchi {
        return Err(FilterError::invalid(format!(
            "fclo ({fclo}) must be strictly less than fchi ({fchi})"
        )));
    }
    Ok((fclo, fchi))
}

// ── FilterSpec ────────────────────────────────────────────────────────────────

/// Everything needed to design one kernel.
///
/// ```
/// use sincfir::{FilterSpec, WindowSpec};
///
/// let spec = FilterSpec::bandpass(0.05, 0.15)
///     .unwrap()
///     .with_order(101)
///     .with_window(WindowSpec::name("blackman"));
/// assert_eq!(spec.order(), Some(101));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Filter type and its cutoffs.
    response: Response,

    /// Number of taps.
    ///
    /// `None` means "decide at the call site": [`crate::filter::filter`]
    /// substitutes the signal length.
    ///
    /// Default: unset.
    order: Option<usize>,

    /// Taper multiplied into the raw sinc response.
    ///
    /// Default: `hamming`.
    window: WindowSpec,
}

impl FilterSpec {
    fn new(response: Response) -> Self {
        Self { response, order: None, window: WindowSpec::default() }
    }

    /// Bare taper normalised to unit sum.
    pub fn window() -> Self {
        Self::new(Response::Window)
    }

    pub fn lowpass(fc: f64) -> Result<Self> {
        Ok(Self::new(Response::Lowpass { fc: check_cutoff("fc", fc)? }))
    }

    pub fn highpass(fc: f64) -> Result<Self> {
        Ok(Self::new(Response::Highpass { fc: check_cutoff("fc", fc)? }))
    }

    pub fn bandpass(fclo: f64, fchi: f64) -> Result<Self> {
        let (fclo, fchi) = check_band(fclo, fchi)?;
        Ok(Self::new(Response::Bandpass { fclo, fchi }))
    }

    /// Band-reject (notch) filter between `fclo` and `fchi`.
    pub fn bandstop(fclo: f64, fchi: f64) -> Result<Self> {
        let (fclo, fchi) = check_band(fclo, fchi)?;
        Ok(Self::new(Response::Bandstop { fclo, fchi }))
    }

    /// Build a spec from loosely typed parts, e.g. command-line arguments.
    ///
    /// Cutoffs not used by `kind` are ignored; a missing required cutoff is an
    /// [`FilterError::InvalidParameter`].
    pub fn from_kind(
        kind: FilterType,
        fc: Option<f64>,
        fclo: Option<f64>,
        fchi: Option<f64>,
    ) -> Result<Self> {
        let need = |name: &str, v: Option<f64>| {
            v.ok_or_else(|| FilterError::invalid(format!("{kind} filter requires {name}")))
        };
        match kind {
            FilterType::Window => Ok(Self::window()),
            FilterType::Lowpass => Self::lowpass(need("fc", fc)?),
            FilterType::Highpass => Self::highpass(need("fc", fc)?),
            FilterType::Bandpass => Self::bandpass(need("fclo", fclo)?, need("fchi", fchi)?),
            FilterType::Bandstop => Self::bandstop(need("fclo", fclo)?, need("fchi", fchi)?),
        }
    }

    /// Set the number of taps. `0` clears the order so the default applies.
    pub fn with_order(mut self, n: usize) -> Self {
        self.order = (n > 0).then_some(n);
        self
    }

    pub fn with_window(mut self, window: WindowSpec) -> Self {
        self.window = window;
        self
    }

    pub fn response(&self) -> Response {
        self.response
    }

    pub fn kind(&self) -> FilterType {
        self.response.kind()
    }

    pub fn order(&self) -> Option<usize> {
        self.order
    }

    pub fn window_spec(&self) -> &WindowSpec {
        &self.window
    }
}

// ── WindowSpec ────────────────────────────────────────────────────────────────

/// Taper selection: a bare name, or a name plus numeric parameters.
///
/// Resolved by a [`crate::window::WindowProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSpec {
    Name(String),
    Parameterized { name: String, params: BTreeMap<String, f64> },
}

impl WindowSpec {
    pub fn name(name: impl Into<String>) -> Self {
        WindowSpec::Name(name.into())
    }

    pub fn with_params<K: Into<String>>(
        name: impl Into<String>,
        params: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        WindowSpec::Parameterized {
            name: name.into(),
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn base_name(&self) -> &str {
        match self {
            WindowSpec::Name(name) | WindowSpec::Parameterized { name, .. } => name,
        }
    }

    pub fn param(&self, key: &str) -> Option<f64> {
        match self {
            WindowSpec::Name(_) => None,
            WindowSpec::Parameterized { params, .. } => params.get(key).copied(),
        }
    }
}

impl Default for WindowSpec {
    /// Hamming, the taper used when none is named.
    fn default() -> Self {
        WindowSpec::name("hamming")
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSpec::Name(name) => f.write_str(name),
            WindowSpec::Parameterized { name, params } => {
                write!(f, "{name}:")?;
                for (i, (k, v)) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Parses `name` or `name:key=value,key=value`.
impl FromStr for WindowSpec {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, rest) = match s.split_once(':') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (s.trim(), None),
        };
        if name.is_empty() {
            return Err(FilterError::invalid("window name is empty"));
        }
        let Some(rest) = rest else {
            return Ok(WindowSpec::name(name));
        };

        let mut params = BTreeMap::new();
        for pair in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').ok_or_else(|| {
                FilterError::invalid(format!("window parameter '{pair}' is not key=value"))
            })?;
            let v: f64 = v.trim().parse().map_err(|_| {
                FilterError::invalid(format!("window parameter '{k}' is not a number: '{v}'"))
            })?;
            params.insert(k.trim().to_string(), v);
        }
        Ok(WindowSpec::Parameterized { name: name.to_string(), params })
    }
}

// ── BoundaryPolicy ────────────────────────────────────────────────────────────

/// How convolution treats samples beyond the ends of the signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Repeat the nearest edge sample.
    #[default]
    Extend,
    /// Out-of-range samples contribute nothing (zero padding).
    Truncate,
    /// Wrap around to the opposite end.
    Periodic,
}

impl BoundaryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryPolicy::Extend => "extend",
            BoundaryPolicy::Truncate => "truncate",
            BoundaryPolicy::Periodic => "periodic",
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extend" => Ok(BoundaryPolicy::Extend),
            "truncate" => Ok(BoundaryPolicy::Truncate),
            "periodic" => Ok(BoundaryPolicy::Periodic),
            other => Err(FilterError::invalid(format!(
                "unknown boundary policy '{other}' (expected extend, truncate or periodic)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_type_aliases() {
        assert_eq!("notch".parse::<FilterType>().unwrap(), FilterType::Bandstop);
        assert_eq!("BandReject".parse::<FilterType>().unwrap(), FilterType::Bandstop);
        assert_eq!("low".parse::<FilterType>().unwrap(), FilterType::Lowpass);
    }

    #[test]
    fn unknown_filter_type_is_named() {
        let err = "comb".parse::<FilterType>().unwrap_err();
        assert_eq!(err, FilterError::UnknownFilterType("comb".into()));
    }

    #[test]
    fn cutoffs_must_be_inside_unit_interval() {
        for fc in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            assert!(matches!(
                FilterSpec::lowpass(fc),
                Err(FilterError::InvalidParameter(_))
            ), "fc={fc} accepted");
        }
        assert!(FilterSpec::highpass(0.999).is_ok());
    }

    #[test]
    fn band_edges_must_be_ordered() {
        assert!(FilterSpec::bandpass(0.2, 0.1).is_err());
        assert!(FilterSpec::bandstop(0.2, 0.2).is_err());
        assert!(FilterSpec::bandstop(0.1, 0.2).is_ok());
    }

    #[test]
    fn from_kind_requires_cutoffs() {
        assert!(FilterSpec::from_kind(FilterType::Highpass, None, None, None).is_err());
        assert!(FilterSpec::from_kind(FilterType::Bandpass, None, Some(0.1), None).is_err());
        let spec = FilterSpec::from_kind(FilterType::Bandpass, None, Some(0.1), Some(0.3)).unwrap();
        assert_eq!(spec.response(), Response::Bandpass { fclo: 0.1, fchi: 0.3 });
        assert!(FilterSpec::from_kind(FilterType::Window, None, None, None).is_ok());
    }

    #[test]
    fn zero_order_means_unset() {
        let spec = FilterSpec::lowpass(0.1).unwrap().with_order(51);
        assert_eq!(spec.order(), Some(51));
        assert_eq!(spec.with_order(0).order(), None);
    }

    #[test]
    fn window_spec_parsing() {
        assert_eq!("hann".parse::<WindowSpec>().unwrap(), WindowSpec::name("hann"));

        let spec: WindowSpec = "kaiser:beta=5.5".parse().unwrap();
        assert_eq!(spec.base_name(), "kaiser");
        assert_eq!(spec.param("beta"), Some(5.5));
        assert_eq!(spec.to_string(), "kaiser:beta=5.5");

        assert!("kaiser:beta".parse::<WindowSpec>().is_err());
        assert!("kaiser:beta=abc".parse::<WindowSpec>().is_err());
        assert!(":beta=1".parse::<WindowSpec>().is_err());
    }

    #[test]
    fn boundary_default_is_extend() {
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Extend);
        assert_eq!("Periodic".parse::<BoundaryPolicy>().unwrap(), BoundaryPolicy::Periodic);
        assert!("mirror".parse::<BoundaryPolicy>().is_err());
    }
}
