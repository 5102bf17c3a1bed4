//! Dispatchable argument wrappers

use crate::Value;

/// Declared type of a dispatchable argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchType {
    /// The generic array type
    NdArray,
    /// A dtype-like argument
    Dtype,
    /// A scalar argument
    Scalar,
}

/// An argument the dispatch framework lets backends inspect and replace
#[derive(Debug, Clone)]
pub struct Dispatchable<A> {
    pub value: Value<A>,
    pub kind: DispatchType,
    /// Whether a backend may convert the value to its own type
    pub coercible: bool,
}

impl<A> Dispatchable<A> {
    pub fn new(value: Value<A>, kind: DispatchType, coercible: bool) -> Self {
        Self {
            value,
            kind,
            coercible,
        }
    }

    /// Coercible generic-array argument
    pub fn array(value: Value<A>) -> Self {
        Self::new(value, DispatchType::NdArray, true)
    }

    pub fn into_value(self) -> Value<A> {
        self.value
    }

    pub(crate) fn wants_device_array(&self) -> bool {
        self.coercible && self.kind == DispatchType::NdArray
    }
}
