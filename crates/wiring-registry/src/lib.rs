//! Definition storage and class signatures for the wiring container.
//!
//! - [`DefinitionRegistry`]: ordered service definitions, container-wide
//!   bindings and the consumed-binding set
//! - [`BindingTable`]: the layered binding view of one definition
//! - [`ClassCatalog`]: an in-memory [`SignatureProvider`](wiring_core::SignatureProvider)

mod binding_table;
mod catalog;
mod registry;

pub use binding_table::BindingTable;
pub use catalog::{CatalogError, ClassCatalog, ClassDecl};
pub use registry::DefinitionRegistry;
