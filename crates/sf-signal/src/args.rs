//! Binding positional and keyword arguments to an upstream signature

use std::str::FromStr;

use crate::{BackendError, Kwargs, Result, Value};

/// Default value of an optional parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Str(&'static str),
    Int(i64),
    None,
}

impl ParamDefault {
    fn to_value<A>(self) -> Value<A> {
        match self {
            ParamDefault::Str(s) => Value::Str(s.to_string()),
            ParamDefault::Int(v) => Value::Int(v),
            ParamDefault::None => Value::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub default: Option<ParamDefault>,
}

impl Param {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, default: ParamDefault) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }
}

/// Parameter list of an upstream function, in declaration order
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub name: &'static str,
    pub params: &'static [Param],
}

impl Signature {
    pub const fn new(name: &'static str, params: &'static [Param]) -> Self {
        Self { name, params }
    }

    fn error(&self, message: String) -> BackendError {
        BackendError::Signature {
            function: self.name,
            message,
        }
    }

    /// Positional arguments fill parameters in order, keywords by name,
    /// defaults cover the rest.
    pub fn bind<A>(&self, args: Vec<Value<A>>, mut kwargs: Kwargs<A>) -> Result<BoundArgs<A>> {
        if args.len() > self.params.len() {
            return Err(self.error(format!(
                "takes {} positional arguments but {} were given",
                self.params.len(),
                args.len()
            )));
        }

        let mut slots: Vec<Option<Value<A>>> = args.into_iter().map(Some).collect();
        slots.resize_with(self.params.len(), || None);

        for (slot, param) in slots.iter_mut().zip(self.params) {
            if let Some(value) = kwargs.remove(param.name) {
                if slot.is_some() {
                    return Err(self.error(format!(
                        "got multiple values for argument '{}'",
                        param.name
                    )));
                }
                *slot = Some(value);
            }
        }

        if let Some(unknown) = kwargs.keys().next() {
            return Err(self.error(format!("got an unexpected keyword argument '{}'", unknown)));
        }

        let values = slots
            .into_iter()
            .zip(self.params)
            .map(|(slot, param)| match (slot, param.default) {
                (Some(value), _) => Ok(value),
                (None, Some(default)) => Ok(default.to_value()),
                (None, None) => Err(self.error(format!(
                    "missing required argument '{}'",
                    param.name
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BoundArgs {
            signature: *self,
            values,
        })
    }
}

/// Arguments bound to a [`Signature`], taken out one parameter at a time
#[derive(Debug)]
pub struct BoundArgs<A> {
    signature: Signature,
    values: Vec<Value<A>>,
}

impl<A> BoundArgs<A> {
    fn param(&self, name: &'static str) -> Result<usize> {
        self.signature
            .params
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| self.signature.error(format!("has no parameter '{}'", name)))
    }

    fn type_error(&self, param: &'static str, expected: &'static str, found: &Value<A>) -> BackendError {
        BackendError::Type {
            function: self.signature.name,
            param,
            expected,
            found: found.type_name(),
        }
    }

    fn invalid(&self, param: &'static str, message: String) -> BackendError {
        BackendError::InvalidArgument {
            function: self.signature.name,
            param,
            message,
        }
    }

    /// Raw bound value
    pub fn value(&mut self, name: &'static str) -> Result<Value<A>> {
        let index = self.param(name)?;
        Ok(std::mem::replace(&mut self.values[index], Value::None))
    }

    /// Device array argument
    pub fn array(&mut self, name: &'static str) -> Result<A> {
        match self.value(name)? {
            Value::Device(array) => Ok(array),
            other => Err(self.type_error(name, "device array", &other)),
        }
    }

    /// String option parsed into a choice enum
    pub fn choice<T: FromStr>(&mut self, name: &'static str) -> Result<T> {
        match self.value(name)? {
            Value::Str(s) => s
                .parse::<T>()
                .map_err(|_| self.invalid(name, format!("unrecognized option {:?}", s))),
            other => Err(self.type_error(name, "str", &other)),
        }
    }

    pub fn int(&mut self, name: &'static str) -> Result<i64> {
        match self.value(name)? {
            Value::Int(v) => Ok(v),
            other => Err(self.type_error(name, "int", &other)),
        }
    }

    /// Integer >= 1
    pub fn positive(&mut self, name: &'static str) -> Result<usize> {
        let v = self.int(name)?;
        usize::try_from(v)
            .ok()
            .filter(|&v| v >= 1)
            .ok_or_else(|| self.invalid(name, format!("must be a positive integer, got {}", v)))
    }

    /// Float, or an int widened to float
    pub fn float(&mut self, name: &'static str) -> Result<f64> {
        match self.value(name)? {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(self.type_error(name, "float", &other)),
        }
    }

    pub fn axis(&mut self, name: &'static str) -> Result<isize> {
        let v = self.int(name)?;
        isize::try_from(v).map_err(|_| self.invalid(name, format!("axis {} out of range", v)))
    }

    /// `None`, a single axis, or a sequence of axes
    pub fn axes(&mut self, name: &'static str) -> Result<Option<Vec<isize>>> {
        match self.value(name)? {
            Value::None => Ok(None),
            Value::Int(v) => isize::try_from(v)
                .map(|axis| Some(vec![axis]))
                .map_err(|_| self.invalid(name, format!("axis {} out of range", v))),
            Value::Axes(axes) => Ok(Some(axes)),
            other => Err(self.type_error(name, "None, int or axes", &other)),
        }
    }
}
