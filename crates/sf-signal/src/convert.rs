//! Argument conversion shared by all backends

use crate::{ArrayModule, Dispatchable, Outcome, Value};

/// Convert dispatchable arguments for `module`.
///
/// - no dispatchables: empty argument list
/// - `coerce`: coercible generic arrays become device arrays, everything else
///   passes through; a single failed conversion declines the whole call
/// - otherwise every value passes through untouched
pub fn convert<M: ArrayModule + ?Sized>(
    module: &M,
    dispatchables: Option<Vec<Dispatchable<M::Array>>>,
    coerce: bool,
) -> Outcome<Vec<Value<M::Array>>> {
    let Some(dispatchables) = dispatchables else {
        return Outcome::Handled(Vec::new());
    };

    if !coerce {
        return Outcome::Handled(dispatchables.into_iter().map(Dispatchable::into_value).collect());
    }

    let mut replaced = Vec::with_capacity(dispatchables.len());
    for dispatchable in dispatchables {
        if !dispatchable.wants_device_array() {
            replaced.push(dispatchable.into_value());
            continue;
        }

        match module.asarray(dispatchable.value) {
            Ok(array) => replaced.push(Value::Device(array)),
            Err(err) => {
                log::debug!("declining conversion: {}", err);
                return Outcome::NotImplemented;
            }
        }
    }

    Outcome::Handled(replaced)
}
