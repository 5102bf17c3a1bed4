//! In-memory accelerated library for unit tests

use std::cell::{Cell, RefCell};

use crate::convolution::{Boundary, ConvolutionLibrary, Method, Mode};
use crate::upfirdn::ResamplingLibrary;
use crate::{ArrayModule, ConversionError, LibraryError, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceArray {
    pub data: Vec<f64>,
    pub shape: Vec<usize>,
    /// Operation that produced the array
    pub origin: String,
}

pub fn device(data: &[f64]) -> DeviceArray {
    DeviceArray {
        data: data.to_vec(),
        shape: vec![data.len()],
        origin: "device".to_string(),
    }
}

/// Records the last operation and answers with a flat full convolution
#[derive(Debug, Default)]
pub struct MockDevice {
    failure: Option<String>,
    conversions: Cell<usize>,
    last_call: RefCell<Option<String>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every library operation fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn conversions(&self) -> usize {
        self.conversions.get()
    }

    pub fn last_call(&self) -> Option<String> {
        self.last_call.borrow().clone()
    }

    fn run(&self, call: String, a: &DeviceArray, b: &DeviceArray) -> Result<DeviceArray, LibraryError> {
        let origin = call.split('(').next().unwrap_or_default().to_string();
        *self.last_call.borrow_mut() = Some(call);

        if let Some(message) = &self.failure {
            return Err(LibraryError::new(message.clone()));
        }

        let mut data = vec![0.0; (a.data.len() + b.data.len()).saturating_sub(1)];
        for (i, x) in a.data.iter().enumerate() {
            for (j, y) in b.data.iter().enumerate() {
                data[i + j] += x * y;
            }
        }
        Ok(DeviceArray {
            shape: vec![data.len()],
            data,
            origin,
        })
    }
}

impl ArrayModule for MockDevice {
    type Array = DeviceArray;

    fn asarray(&self, value: Value<DeviceArray>) -> Result<DeviceArray, ConversionError> {
        self.conversions.set(self.conversions.get() + 1);
        match value {
            Value::Host(array) => Ok(DeviceArray {
                data: array.iter().copied().collect(),
                shape: array.shape().to_vec(),
                origin: "asarray".to_string(),
            }),
            Value::Device(array) => Ok(array),
            Value::Float(v) => Ok(DeviceArray {
                data: vec![v],
                shape: Vec::new(),
                origin: "asarray".to_string(),
            }),
            other => Err(ConversionError::new(other.type_name())),
        }
    }
}

impl ConvolutionLibrary for MockDevice {
    fn convolve(
        &self,
        in1: &DeviceArray,
        in2: &DeviceArray,
        mode: Mode,
        method: Method,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(format!("convolve({:?}, {:?})", mode, method), in1, in2)
    }

    fn correlate(
        &self,
        in1: &DeviceArray,
        in2: &DeviceArray,
        mode: Mode,
        method: Method,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(format!("correlate({:?}, {:?})", mode, method), in1, in2)
    }

    fn fftconvolve(
        &self,
        in1: &DeviceArray,
        in2: &DeviceArray,
        mode: Mode,
        axes: Option<&[isize]>,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(format!("fftconvolve({:?}, {:?})", mode, axes), in1, in2)
    }

    fn oaconvolve(
        &self,
        in1: &DeviceArray,
        in2: &DeviceArray,
        mode: Mode,
        axes: Option<&[isize]>,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(format!("oaconvolve({:?}, {:?})", mode, axes), in1, in2)
    }

    fn convolve2d(
        &self,
        in1: &DeviceArray,
        in2: &DeviceArray,
        mode: Mode,
        boundary: Boundary,
        fillvalue: f64,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(
            format!("convolve2d({:?}, {:?}, {})", mode, boundary, fillvalue),
            in1,
            in2,
        )
    }
}

impl ResamplingLibrary for MockDevice {
    fn upfirdn(
        &self,
        h: &DeviceArray,
        x: &DeviceArray,
        up: usize,
        down: usize,
        axis: isize,
    ) -> Result<DeviceArray, LibraryError> {
        self.run(format!("upfirdn({}, {}, {})", up, down, axis), h, x)
    }
}
