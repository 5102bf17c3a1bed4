//! # sf-signal
//!
//! Array-dispatch backends for signal-processing functions.
//!
//! A dispatch framework calls an upstream function (`scipy.signal.convolve`,
//! `scipy.signal.upfirdn`, ...) and asks the registered backends to handle
//! it. Each backend here wraps an accelerated array library and:
//!
//! - converts dispatchable arguments to the library's array type
//!   ([`Backend::convert`])
//! - looks the function up in a fixed [`DispatchTable`] and forwards the
//!   arguments, bound to the upstream signature, to the library operation
//!   of the same name ([`Backend::call`])
//!
//! Functions outside a backend's table are declined with
//! [`Outcome::NotImplemented`] so the framework can fall back. Errors raised
//! while handling a call are [`BackendError`]s and propagate unchanged.
//!
//! ```text
//! BackendSet ──▶ ConvolutionBackend<L: ConvolutionLibrary>
//!            └─▶ UpfirdnBackend<L: ResamplingLibrary>
//! ```

pub mod args;
pub mod backend;
pub mod convert;
pub mod convolution;
pub mod dispatchable;
pub mod error;
pub mod registry;
pub mod table;
pub mod upfirdn;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

pub use args::{BoundArgs, Param, ParamDefault, Signature};
pub use backend::{ArrayModule, Backend, DOMAIN, Outcome, SignalFunction};
pub use convolution::{Boundary, ConvolutionBackend, ConvolutionLibrary, Method, Mode};
pub use dispatchable::{DispatchType, Dispatchable};
pub use error::{BackendError, ConversionError, LibraryError, Result};
pub use registry::BackendSet;
pub use table::{DispatchTable, Forward};
pub use upfirdn::{ResamplingLibrary, UpfirdnBackend};
pub use value::{HostArray, Kwargs, Value};
