//! Call values crossing the dispatch boundary

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::ArrayD;

/// The generic (host) array type. Shared so pass-through keeps identity.
pub type HostArray = Arc<ArrayD<f64>>;

/// Keyword arguments by parameter name
pub type Kwargs<A> = BTreeMap<String, Value<A>>;

/// One argument or result of a dispatched call.
///
/// `A` is the accelerated library's array type.
#[derive(Debug, Clone)]
pub enum Value<A> {
    /// Generic host array
    Host(HostArray),
    /// Accelerated-library array
    Device(A),
    Float(f64),
    Int(i64),
    Str(String),
    /// Sequence of axis indices
    Axes(Vec<isize>),
    None,
}

impl<A> Value<A> {
    pub fn host(array: ArrayD<f64>) -> Self {
        Value::Host(Arc::new(array))
    }

    /// Short type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Host(_) => "host array",
            Value::Device(_) => "device array",
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Axes(_) => "axes",
            Value::None => "None",
        }
    }

    pub fn as_host(&self) -> Option<&HostArray> {
        match self {
            Value::Host(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_device(&self) -> Option<&A> {
        match self {
            Value::Device(array) => Some(array),
            _ => None,
        }
    }
}

impl<A> From<f64> for Value<A> {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl<A> From<i64> for Value<A> {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl<A> From<&str> for Value<A> {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<A> From<String> for Value<A> {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<A> From<ArrayD<f64>> for Value<A> {
    fn from(array: ArrayD<f64>) -> Self {
        Value::host(array)
    }
}
