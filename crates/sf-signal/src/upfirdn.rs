//! Upsample-FIR-downsample backend

use crate::args::{Param, ParamDefault, Signature};
use crate::table::{DispatchTable, Forward};
use crate::{
    ArrayModule, Backend, Dispatchable, Kwargs, LibraryError, Outcome, Result, SignalFunction,
    Value, convert,
};

/// Polyphase resampling operations of an accelerated array library
pub trait ResamplingLibrary: ArrayModule {
    /// Upsample `x` by `up`, filter with `h`, downsample by `down` along `axis`
    fn upfirdn(
        &self,
        h: &Self::Array,
        x: &Self::Array,
        up: usize,
        down: usize,
        axis: isize,
    ) -> std::result::Result<Self::Array, LibraryError>;
}

const UPFIRDN: Signature = Signature::new(
    "upfirdn",
    &[
        Param::required("h"),
        Param::required("x"),
        Param::optional("up", ParamDefault::Int(1)),
        Param::optional("down", ParamDefault::Int(1)),
        Param::optional("axis", ParamDefault::Int(-1)),
        Param::optional("mode", ParamDefault::Str("constant")),
        Param::optional("cval", ParamDefault::Int(0)),
    ],
);

fn upfirdn<L: ResamplingLibrary>(
    lib: &L,
    args: Vec<Value<L::Array>>,
    kwargs: Kwargs<L::Array>,
) -> Result<Value<L::Array>> {
    let mut bound = UPFIRDN.bind(args, kwargs)?;
    let (h, x) = (bound.array("h")?, bound.array("x")?);
    let up = bound.positive("up")?;
    let down = bound.positive("down")?;
    let axis = bound.axis("axis")?;

    // The device upfirdn has no padding options: mode and cval are bound, then dropped.
    let _ = (bound.value("mode")?, bound.value("cval")?);

    Ok(Value::Device(lib.upfirdn(&h, &x, up, down, axis)?))
}

/// Backend forwarding `upfirdn` to `L`
pub struct UpfirdnBackend<L: ResamplingLibrary> {
    library: L,
    table: DispatchTable<L>,
}

impl<L: ResamplingLibrary> UpfirdnBackend<L> {
    pub fn new(library: L) -> Self {
        Self {
            library,
            table: DispatchTable::new([(SignalFunction::Upfirdn, upfirdn::<L> as Forward<L>)]),
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }
}

impl<L: ResamplingLibrary> Backend for UpfirdnBackend<L> {
    type Array = L::Array;

    fn name(&self) -> &str {
        "upfirdn"
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
