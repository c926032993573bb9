//! Wiring Compiler
//!
//! Build-time passes that rewrite service definitions in a
//! [`DefinitionRegistry`](wiring_registry::DefinitionRegistry).
//!
//! ## Pipeline
//!
//! 1. **Autowire required methods**: schedule calls to required setters of
//!    autowired services
//! 2. **Resolve bindings**: substitute bound values into constructor and
//!    method-call arguments, then report bindings nothing consumed
//!
//! ## Modules
//!
//! - [`argument_resolver`]: parameter matching for a single definition
//! - [`passes`]: the [`CompilerPass`] trait and the built-in passes
//! - [`pipeline`]: pass ordering and the [`Compiler`] driver
//! - [`usage`]: observed and consumed binding tracking

pub mod argument_resolver;
pub mod passes;
pub mod pipeline;
pub mod usage;

pub use argument_resolver::{ArgumentResolver, Resolution};
pub use passes::{
    AutowireOutput, AutowireRequiredMethodsPass, CompilerPass, ResolveBindingsPass, ResolveOutput,
    ResolveState,
};
pub use pipeline::{Compiler, PassConfig, PassPhase};
pub use usage::BindingUsage;

// Re-export the error aggregate for convenience
pub use wiring_core::ConfigurationError;
