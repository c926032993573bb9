//! Wiring - binding resolution for a dependency-injection container.
//!
//! Service definitions declare constructor arguments, method calls and
//! *bindings*: values to inject into any parameter with a given name, type or
//! both. Compiling the container substitutes bound values into the argument
//! positions left open, and fails with one aggregate error listing every
//! binding nothing consumed, every method call naming a missing method and
//! every class that cannot be resolved.
//!
//! ## Crates
//!
//! - `wiring-core`: definitions, arguments, bindings, signatures and errors
//! - `wiring-registry`: the definition registry and the class catalog
//! - `wiring-compiler`: the compiler passes and the pass pipeline
//!
//! This crate re-exports all of them and adds [`ContainerBuilder`].
//!
//! ## Features
//!
//! - `profiling`: instrument pass entry points with `profiling` scopes

mod builder;

pub use builder::ContainerBuilder;

pub use wiring_compiler::{
    ArgumentResolver, AutowireOutput, AutowireRequiredMethodsPass, BindingUsage, Compiler,
    CompilerPass, PassConfig, PassPhase, Resolution, ResolveBindingsPass, ResolveOutput,
    ResolveState,
};
pub use wiring_core::{
    Argument, BindingError, BindingId, BindingKey, BindingSource, Bindings, BoundArgument,
    BuiltinType, ClassName, ConfigurationError, ContainerError, Factory, LookupError, MethodCall,
    MethodFlags, MethodSignature, ParamFlags, ParamSpec, ParamType, Reference, ServiceDefinition,
    ServiceId, SignatureProvider, TypedReference, Value,
};
pub use wiring_registry::{BindingTable, CatalogError, ClassCatalog, ClassDecl, DefinitionRegistry};
