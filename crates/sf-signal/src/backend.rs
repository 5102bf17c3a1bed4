//! Backend protocol: upstream function identifiers, outcomes and the
//! traits a dispatch framework talks to

use std::fmt;
use std::str::FromStr;

use crate::{BackendError, ConversionError, Dispatchable, Kwargs, Result, Value};

/// API surface every signal backend declares
pub const DOMAIN: &str = "numpy.scipy.signal";

// ============ Outcome ============

/// Result of asking a backend to handle something.
///
/// `NotImplemented` is a decline: the framework should try another backend
/// or the default implementation. It never carries an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Handled(T),
    NotImplemented,
}

impl<T> Outcome<T> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Outcome::NotImplemented)
    }

    pub fn handled(self) -> Option<T> {
        match self {
            Outcome::Handled(value) => Some(value),
            Outcome::NotImplemented => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Handled(value) => Outcome::Handled(f(value)),
            Outcome::NotImplemented => Outcome::NotImplemented,
        }
    }
}

// ============ Upstream Functions ============

/// Upstream function identifiers known to the dispatch framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalFunction {
    Convolve,
    Correlate,
    FftConvolve,
    OaConvolve,
    Convolve2d,
    Correlate2d,
    Upfirdn,
    Lfilter,
    Resample,
    ResamplePoly,
    Decimate,
    Hilbert,
}

impl SignalFunction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Convolve => "convolve",
            Self::Correlate => "correlate",
            Self::FftConvolve => "fftconvolve",
            Self::OaConvolve => "oaconvolve",
            Self::Convolve2d => "convolve2d",
            Self::Correlate2d => "correlate2d",
            Self::Upfirdn => "upfirdn",
            Self::Lfilter => "lfilter",
            Self::Resample => "resample",
            Self::ResamplePoly => "resample_poly",
            Self::Decimate => "decimate",
            Self::Hilbert => "hilbert",
        }
    }

    pub fn all() -> &'static [SignalFunction] {
        &[
            Self::Convolve,
            Self::Correlate,
            Self::FftConvolve,
            Self::OaConvolve,
            Self::Convolve2d,
            Self::Correlate2d,
            Self::Upfirdn,
            Self::Lfilter,
            Self::Resample,
            Self::ResamplePoly,
            Self::Decimate,
            Self::Hilbert,
        ]
    }
}

impl fmt::Display for SignalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scipy.signal.{}", self.name())
    }
}

impl FromStr for SignalFunction {
    type Err = BackendError;

    /// Accepts `convolve` or `scipy.signal.convolve`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.strip_prefix("scipy.signal.").unwrap_or(s);
        Self::all()
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| BackendError::UnknownFunction(s.to_string()))
    }
}

// ============ Traits ============

/// Array constructor of an accelerated library
pub trait ArrayModule {
    /// The library's native array type
    type Array: Clone + fmt::Debug;

    /// Build a native array from a call value
    fn asarray(&self, value: Value<Self::Array>) -> std::result::Result<Self::Array, ConversionError>;
}

/// What a dispatch framework needs from a backend
pub trait Backend {
    type Array;

    /// Name for diagnostics
    fn name(&self) -> &str;

    fn domain(&self) -> &str {
        DOMAIN
    }

    /// Upstream functions in this backend's table
    fn functions(&self) -> Vec<SignalFunction>;

    fn supports(&self, function: SignalFunction) -> bool {
        self.functions().contains(&function)
    }

    /// Replace dispatchable arguments with this backend's types
    fn convert(
        &self,
        dispatchables: Option<Vec<Dispatchable<Self::Array>>>,
        coerce: bool,
    ) -> Outcome<Vec<Value<Self::Array>>>;

    /// Run `function` if this backend covers it
    fn call(
        &self,
        function: SignalFunction,
        args: Vec<Value<Self::Array>>,
        kwargs: Kwargs<Self::Array>,
    ) -> Result<Outcome<Value<Self::Array>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_names_round_trip() {
        for function in SignalFunction::all() {
            assert_eq!(function.name().parse::<SignalFunction>().unwrap(), *function);
        }
    }

    #[test]
    fn test_qualified_names() {
        let f: SignalFunction = "scipy.signal.fftconvolve".parse().unwrap();
        assert_eq!(f, SignalFunction::FftConvolve);
        assert_eq!(f.to_string(), "scipy.signal.fftconvolve");
        assert!("scipy.signal.nope".parse::<SignalFunction>().is_err());
    }

    #[test]
    fn test_outcome_helpers() {
        let handled: Outcome<i32> = Outcome::Handled(2);
        assert!(handled.is_handled());
        assert_eq!(handled.map(|v| v * 2).handled(), Some(4));

        let declined: Outcome<i32> = Outcome::NotImplemented;
        assert!(declined.is_not_implemented());
        assert_eq!(declined.handled(), None);
    }
}
