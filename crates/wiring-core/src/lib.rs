//! Core value model for the wiring container.
//!
//! This crate holds the types every other crate speaks in:
//!
//! - [`ServiceDefinition`], [`MethodCall`], [`Factory`]: what to build
//! - [`Argument`], [`Value`], [`Reference`], [`TypedReference`]: argument slots
//! - [`BindingKey`], [`BoundArgument`], [`Bindings`]: explicit overrides
//! - [`MethodSignature`], [`ParamSpec`], [`SignatureProvider`]: the
//!   build-time signature seam
//! - [`BindingError`], [`ConfigurationError`], [`ContainerError`]: errors

mod binding;
mod class_name;
mod definition;
mod error;
mod ids;
mod signature;
mod value;

pub use binding::{BindingKey, BindingSource, Bindings, BoundArgument};
pub use class_name::ClassName;
pub use definition::{Factory, MethodCall, ServiceDefinition};
pub use error::{BindingError, ConfigurationError, ContainerError, LookupError};
pub use ids::{BindingId, ServiceId};
pub use signature::{
    BuiltinType, MethodFlags, MethodSignature, ParamFlags, ParamSpec, ParamType,
    SignatureProvider,
};
pub use value::{Argument, Reference, TypedReference, Value};
