//! Fixed dispatch tables and the call dispatcher

use std::collections::BTreeMap;

use crate::{ArrayModule, Kwargs, Outcome, Result, SignalFunction, Value};

/// Forwarding function: binds the upstream signature and calls the library
pub type Forward<L> = fn(
    &L,
    Vec<Value<<L as ArrayModule>::Array>>,
    Kwargs<<L as ArrayModule>::Array>,
) -> Result<Value<<L as ArrayModule>::Array>>;

/// Upstream function → forwarding function, fixed at construction
pub struct DispatchTable<L: ArrayModule> {
    entries: BTreeMap<SignalFunction, Forward<L>>,
}

impl<L: ArrayModule> DispatchTable<L> {
    pub fn new<const N: usize>(entries: [(SignalFunction, Forward<L>); N]) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn contains(&self, function: SignalFunction) -> bool {
        self.entries.contains_key(&function)
    }

    /// Key set, in declaration order of [`SignalFunction`]
    pub fn functions(&self) -> Vec<SignalFunction> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forward `function` to `library`, or decline when it has no entry.
    ///
    /// Errors from the forwarding function propagate unchanged.
    pub fn call(
        &self,
        library: &L,
        function: SignalFunction,
        args: Vec<Value<L::Array>>,
        kwargs: Kwargs<L::Array>,
    ) -> Result<Outcome<Value<L::Array>>> {
        match self.entries.get(&function) {
            Some(forward) => forward(library, args, kwargs).map(Outcome::Handled),
            None => {
                log::debug!("{} not in dispatch table, declining", function);
                Ok(Outcome::NotImplemented)
            }
        }
    }
}
