//! Compiler passes.
//!
//! - [`autowire_required`]: add calls to required setter methods of autowired services
//! - [`resolve_bindings`]: substitute bound values into argument positions

pub mod autowire_required;
pub mod resolve_bindings;

pub use autowire_required::{AutowireOutput, AutowireRequiredMethodsPass};
pub use resolve_bindings::{ResolveBindingsPass, ResolveOutput, ResolveState};

use wiring_core::{ConfigurationError, SignatureProvider};
use wiring_registry::DefinitionRegistry;

/// A step of container compilation.
///
/// Passes run one after another over the same registry. A pass that returns
/// an error stops the build.
pub trait CompilerPass {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn process(
        &mut self,
        registry: &mut DefinitionRegistry,
        signatures: &dyn SignatureProvider,
    ) -> Result<(), ConfigurationError>;
}
