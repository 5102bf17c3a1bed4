//! Convolution / correlation backend
//!
//! Covers `convolve`, `correlate`, `fftconvolve`, `oaconvolve` and
//! `convolve2d`. Each forwarding function accepts the upstream parameter
//! surface (same names, same defaults) and calls the library's operation of
//! the same name with the same arguments.

use std::str::FromStr;

use crate::args::{Param, ParamDefault, Signature};
use crate::table::{DispatchTable, Forward};
use crate::{
    ArrayModule, Backend, Dispatchable, Kwargs, LibraryError, Outcome, Result, SignalFunction,
    Value, convert,
};

// ============ Options ============

/// Output size of a convolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Full,
    Valid,
    Same,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "valid" => Ok(Self::Valid),
            "same" => Ok(Self::Same),
            _ => Err(s.to_string()),
        }
    }
}

/// Direct or FFT evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Auto,
    Direct,
    Fft,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "direct" => Ok(Self::Direct),
            "fft" => Ok(Self::Fft),
            _ => Err(s.to_string()),
        }
    }
}

/// 2-D boundary handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Pad with `fillvalue`
    Fill,
    /// Circular
    Wrap,
    /// Symmetric reflection
    Symm,
}

impl FromStr for Boundary {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fill" | "pad" => Ok(Self::Fill),
            "wrap" | "circular" => Ok(Self::Wrap),
            "symm" | "symmetric" => Ok(Self::Symm),
            _ => Err(s.to_string()),
        }
    }
}

// ============ Library ============

/// Convolution operations of an accelerated array library
pub trait ConvolutionLibrary: ArrayModule {
    fn convolve(
        &self,
        in1: &Self::Array,
        in2: &Self::Array,
        mode: Mode,
        method: Method,
    ) -> std::result::Result<Self::Array, LibraryError>;

    fn correlate(
        &self,
        in1: &Self::Array,
        in2: &Self::Array,
        mode: Mode,
        method: Method,
    ) -> std::result::Result<Self::Array, LibraryError>;

    fn fftconvolve(
        &self,
        in1: &Self::Array,
        in2: &Self::Array,
        mode: Mode,
        axes: Option<&[isize]>,
    ) -> std::result::Result<Self::Array, LibraryError>;

    fn oaconvolve(
        &self,
        in1: &Self::Array,
        in2: &Self::Array,
        mode: Mode,
        axes: Option<&[isize]>,
    ) -> std::result::Result<Self::Array, LibraryError>;

    fn convolve2d(
        &self,
        in1: &Self::Array,
        in2: &Self::Array,
        mode: Mode,
        boundary: Boundary,
        fillvalue: f64,
    ) -> std::result::Result<Self::Array, LibraryError>;
}

// ============ Forwarding ============

const MODE_FULL: Param = Param::optional("mode", ParamDefault::Str("full"));

const CONVOLVE: Signature = Signature::new(
    "convolve",
    &[
        Param::required("in1"),
        Param::required("in2"),
        MODE_FULL,
        Param::optional("method", ParamDefault::Str("auto")),
    ],
);

const CORRELATE: Signature = Signature::new("correlate", CONVOLVE.params);

const FFTCONVOLVE: Signature = Signature::new(
    "fftconvolve",
    &[
        Param::required("in1"),
        Param::required("in2"),
        MODE_FULL,
        Param::optional("axes", ParamDefault::None),
    ],
);

const OACONVOLVE: Signature = Signature::new("oaconvolve", FFTCONVOLVE.params);

const CONVOLVE2D: Signature = Signature::new(
    "convolve2d",
    &[
        Param::required("in1"),
        Param::required("in2"),
        MODE_FULL,
        Param::optional("boundary", ParamDefault::Str("fill")),
        Param::optional("fillvalue", ParamDefault::Int(0)),
    ],
);

type Args<L> = Vec<Value<<L as ArrayModule>::Array>>;
type Kw<L> = Kwargs<<L as ArrayModule>::Array>;
type Out<L> = Result<Value<<L as ArrayModule>::Array>>;

fn convolve<L: ConvolutionLibrary>(lib: &L, args: Args<L>, kwargs: Kw<L>) -> Out<L> {
    let mut bound = CONVOLVE.bind(args, kwargs)?;
    let (in1, in2) = (bound.array("in1")?, bound.array("in2")?);
    let mode = bound.choice("mode")?;
    let method = bound.choice("method")?;
    Ok(Value::Device(lib.convolve(&in1, &in2, mode, method)?))
}

fn correlate<L: ConvolutionLibrary>(lib: &L, args: Args<L>, kwargs: Kw<L>) -> Out<L> {
    let mut bound = CORRELATE.bind(args, kwargs)?;
    let (in1, in2) = (bound.array("in1")?, bound.array("in2")?);
    let mode = bound.choice("mode")?;
    let method = bound.choice("method")?;
    Ok(Value::Device(lib.correlate(&in1, &in2, mode, method)?))
}

fn fftconvolve<L: ConvolutionLibrary>(lib: &L, args: Args<L>, kwargs: Kw<L>) -> Out<L> {
    let mut bound = FFTCONVOLVE.bind(args, kwargs)?;
    let (in1, in2) = (bound.array("in1")?, bound.array("in2")?);
    let mode = bound.choice("mode")?;
    let axes = bound.axes("axes")?;
    Ok(Value::Device(lib.fftconvolve(&in1, &in2, mode, axes.as_deref())?))
}

fn oaconvolve<L: ConvolutionLibrary>(lib: &L, args: Args<L>, kwargs: Kw<L>) -> Out<L> {
    let mut bound = OACONVOLVE.bind(args, kwargs)?;
    let (in1, in2) = (bound.array("in1")?, bound.array("in2")?);
    let mode = bound.choice("mode")?;
    let axes = bound.axes("axes")?;
    Ok(Value::Device(lib.oaconvolve(&in1, &in2, mode, axes.as_deref())?))
}

fn convolve2d<L: ConvolutionLibrary>(lib: &L, args: Args<L>, kwargs: Kw<L>) -> Out<L> {
    let mut bound = CONVOLVE2D.bind(args, kwargs)?;
    let (in1, in2) = (bound.array("in1")?, bound.array("in2")?);
    let mode = bound.choice("mode")?;
    let boundary = bound.choice("boundary")?;
    let fillvalue = bound.float("fillvalue")?;
    Ok(Value::Device(lib.convolve2d(&in1, &in2, mode, boundary, fillvalue)?))
}

// ============ Backend ============

/// Backend forwarding the five convolution functions to `L`
pub struct ConvolutionBackend<L: ConvolutionLibrary> {
    library: L,
    table: DispatchTable<L>,
}

impl<L: ConvolutionLibrary> ConvolutionBackend<L> {
    pub fn new(library: L) -> Self {
        let table = DispatchTable::new([
            (SignalFunction::Convolve, convolve::<L> as Forward<L>),
            (SignalFunction::Correlate, correlate::<L> as Forward<L>),
            (SignalFunction::FftConvolve, fftconvolve::<L> as Forward<L>),
            (SignalFunction::OaConvolve, oaconvolve::<L> as Forward<L>),
            (SignalFunction::Convolve2d, convolve2d::<L> as Forward<L>),
        ]);
        Self { library, table }
    }

    pub fn library(&self) -> &L {
        &self.library
    }
}

impl<L: ConvolutionLibrary> Backend for ConvolutionBackend<L> {
    type Array = L::Array;

    fn name(&self) -> &str {
        "convolution"
    }

    fn functions(&self) -> Vec<SignalFunction> {
        self.table.functions()
    }

    fn supports(&self, function: SignalFunction) -> bool {
        self.table.contains(function)
    }

    fn convert(
        &self,
        dispatchables: Option<Vec<Dispatchable<L::Array>>>,
        coerce: bool,
    ) -> Outcome<Vec<Value<L::Array>>> {
        convert::convert(&self.library, dispatchables, coerce)
    }

    fn call(
        &self,
        function: SignalFunction,
        args: Vec<Value<L::Array>>,
        kwargs: Kwargs<L::Array>,
    ) -> Result<Outcome<Value<L::Array>>> {
        self.table.call(&self.library, function, args, kwargs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BackendError;
    use crate::testing::{DeviceArray, MockDevice, device};

    fn backend() -> ConvolutionBackend<MockDevice> {
        ConvolutionBackend::new(MockDevice::new())
    }

    fn pair() -> Vec<Value<DeviceArray>> {
        vec![
            Value::Device(device(&[1.0, 2.0, 3.0])),
            Value::Device(device(&[0.0, 1.0, 0.5])),
        ]
    }

    #[test]
    fn test_table_key_set() {
        assert_eq!(
            backend().functions(),
            vec![
                SignalFunction::Convolve,
                SignalFunction::Correlate,
                SignalFunction::FftConvolve,
                SignalFunction::OaConvolve,
                SignalFunction::Convolve2d,
            ]
        );
        assert!(!backend().supports(SignalFunction::Upfirdn));
    }

    #[test]
    fn test_convolve_forwards_defaults() {
        let backend = backend();
        let out = backend
            .call(SignalFunction::Convolve, pair(), Kwargs::new())
            .unwrap();

        let expected = backend.library().convolve(&device(&[1.0, 2.0, 3.0]), &device(&[0.0, 1.0, 0.5]), Mode::Full, Method::Auto).unwrap();
        assert_eq!(out.handled().unwrap().as_device(), Some(&expected));
        assert_eq!(backend.library().last_call().as_deref(), Some("convolve(Full, Auto)"));
    }

    #[test]
    fn test_keyword_options() {
        let backend = backend();
        let kwargs: Kwargs<DeviceArray> = [
            ("mode".to_string(), Value::from("same")),
            ("method".to_string(), Value::from("fft")),
        ]
        .into_iter()
        .collect();

        let _ = backend.call(SignalFunction::Correlate, pair(), kwargs).unwrap();
        assert_eq!(backend.library().last_call().as_deref(), Some("correlate(Same, Fft)"));
    }

    #[test]
    fn test_axes_forms() {
        let backend = backend();

        let mut args = pair();
        args.extend([Value::from("valid"), Value::Int(0)]);
        let _ = backend.call(SignalFunction::FftConvolve, args, Kwargs::new()).unwrap();
        assert_eq!(backend.library().last_call().as_deref(), Some("fftconvolve(Valid, Some([0]))"));

        let mut args = pair();
        args.extend([Value::from("full"), Value::Axes(vec![0, -1])]);
        let _ = backend.call(SignalFunction::OaConvolve, args, Kwargs::new()).unwrap();
        assert_eq!(backend.library().last_call().as_deref(), Some("oaconvolve(Full, Some([0, -1]))"));
    }

    #[test]
    fn test_convolve2d_boundary_aliases() {
        let backend = backend();
        let kwargs: Kwargs<DeviceArray> = [
            ("boundary".to_string(), Value::from("symmetric")),
            ("fillvalue".to_string(), Value::Float(2.5)),
        ]
        .into_iter()
        .collect();

        let _ = backend.call(SignalFunction::Convolve2d, pair(), kwargs).unwrap();
        assert_eq!(
            backend.library().last_call().as_deref(),
            Some("convolve2d(Full, Symm, 2.5)")
        );
    }

    #[test]
    fn test_unknown_mode_is_an_error_not_a_decline() {
        let backend = backend();
        let mut args = pair();
        args.push(Value::from("circular"));

        let err = backend.call(SignalFunction::Convolve, args, Kwargs::new()).unwrap_err();
        assert!(matches!(err, BackendError::InvalidArgument { param: "mode", .. }));
    }

    #[test]
    fn test_library_error_propagates() {
        let backend = ConvolutionBackend::new(MockDevice::failing("out of device memory"));
        let err = backend.call(SignalFunction::Convolve, pair(), Kwargs::new()).unwrap_err();
        assert_eq!(err.to_string(), "Device library error: out of device memory");
    }

    #[test]
    fn test_uncovered_function_declines() {
        let outcome = backend()
            .call(SignalFunction::Lfilter, pair(), Kwargs::new())
            .unwrap();
        assert!(outcome.is_not_implemented());
    }
}
