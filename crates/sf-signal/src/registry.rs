//! Registered backends for one domain

use crate::{
    Backend, BackendError, DOMAIN, Dispatchable, Kwargs, Outcome, Result, SignalFunction, Value,
};

/// Backends sharing one array type, each covering a disjoint set of
/// upstream functions
pub struct BackendSet<A> {
    domain: String,
    backends: Vec<Box<dyn Backend<Array = A>>>,
}

impl<A> Default for BackendSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> BackendSet<A> {
    pub fn new() -> Self {
        Self {
            domain: DOMAIN.to_string(),
            backends: Vec::new(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Add a backend; its domain must match and none of its functions may
    /// already be covered.
    pub fn register(&mut self, backend: Box<dyn Backend<Array = A>>) -> Result<()> {
        if backend.domain() != self.domain {
            return Err(BackendError::Domain {
                expected: self.domain.clone(),
                found: backend.domain().to_string(),
            });
        }

        for function in backend.functions() {
            if let Some(existing) = self.backend_for(function) {
                return Err(BackendError::Overlap {
                    function,
                    existing: existing.name().to_string(),
                });
            }
        }

        log::info!(
            "registered backend '{}' for {} functions",
            backend.name(),
            backend.functions().len()
        );
        self.backends.push(backend);
        Ok(())
    }

    pub fn backend_for(&self, function: SignalFunction) -> Option<&dyn Backend<Array = A>> {
        self.backends
            .iter()
            .find(|b| b.supports(function))
            .map(|b| b.as_ref())
    }

    /// Every covered function, in registration order
    pub fn functions(&self) -> Vec<SignalFunction> {
        self.backends.iter().flat_map(|b| b.functions()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Convert with the backend covering `function`; nobody covering it declines
    pub fn convert(
        &self,
        function: SignalFunction,
        dispatchables: Option<Vec<Dispatchable<A>>>,
        coerce: bool,
    ) -> Outcome<Vec<Value<A>>> {
        match self.backend_for(function) {
            Some(backend) => backend.convert(dispatchables, coerce),
            None => Outcome::NotImplemented,
        }
    }

    /// Route `function` to its backend. `NotImplemented` tells the caller to
    /// fall back to the default implementation.
    pub fn call(
        &self,
        function: SignalFunction,
        args: Vec<Value<A>>,
        kwargs: Kwargs<A>,
    ) -> Result<Outcome<Value<A>>> {
        match self.backend_for(function) {
            Some(backend) => backend.call(function, args, kwargs),
            None => {
                log::debug!("no backend for {}", function);
                Ok(Outcome::NotImplemented)
            }
        }
    }
}
