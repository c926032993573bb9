//! Class Catalog - build-time declarations of class signatures.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: [`ClassDecl`] (constructor and methods declared on the class itself)
//! - Edges: `Extends` from a class to its parent class
//!
//! Classes may be declared in any order. An edge is added as soon as both ends
//! are known, so a parent declared after its child is linked on arrival. A
//! class whose declared parent never shows up does not resolve: every lookup
//! through it fails with [`LookupError::ClassNotFound`] naming the missing
//! ancestor.
//!
//! # Example
//!
//! ```
//! use wiring_registry::{ClassCatalog, ClassDecl};
//! use wiring_core::{ClassName, MethodSignature, ParamSpec, SignatureProvider};
//!
//! let mut catalog = ClassCatalog::new();
//! catalog
//!     .declare(
//!         ClassDecl::new("App::Mailer")
//!             .with_constructor(vec![ParamSpec::typed("transport", "App::Transport")])
//!             .with_method(MethodSignature::new("setLocale", vec![ParamSpec::typed("locale", "string")])),
//!     )
//!     .unwrap();
//!
//! let mailer = ClassName::new("App::Mailer");
//! assert!(catalog.resolve_class(&mailer).is_ok());
//! assert_eq!(catalog.method(&mailer, "setLocale").unwrap().params().len(), 1);
//! ```

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use thiserror::Error;

use wiring_core::{ClassName, LookupError, MethodSignature, ParamSpec, SignatureProvider};

/// Errors raised while declaring classes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("class \"{0}\" is already declared")]
    DuplicateClass(ClassName),
}

/// Signatures declared directly on one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    name: ClassName,
    parent: Option<ClassName>,
    constructor: Option<MethodSignature>,
    methods: Vec<MethodSignature>,
}

impl ClassDecl {
    pub fn new(name: impl Into<ClassName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            constructor: None,
            methods: Vec::new(),
        }
    }

    /// Declare the parent class.
    pub fn extends(mut self, parent: impl Into<ClassName>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_constructor(mut self, params: Vec<ParamSpec>) -> Self {
        self.constructor = Some(MethodSignature::new("__construct", params));
        self
    }

    /// Add a method, replacing an earlier declaration with the same name.
    pub fn with_method(mut self, method: MethodSignature) -> Self {
        match self.methods.iter_mut().find(|m| m.name() == method.name()) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
        self
    }

    pub fn name(&self) -> &ClassName {
        &self.name
    }

    pub fn parent(&self) -> Option<&ClassName> {
        self.parent.as_ref()
    }

    pub fn constructor(&self) -> Option<&MethodSignature> {
        self.constructor.as_ref()
    }

    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|m| m.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Extends;

/// In-memory [`SignatureProvider`] built from [`ClassDecl`]s.
#[derive(Debug, Default)]
pub struct ClassCatalog {
    graph: DiGraph<ClassDecl, Extends>,
    by_name: FxHashMap<ClassName, NodeIndex>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class.
    pub fn declare(&mut self, decl: ClassDecl) -> Result<(), CatalogError> {
        let name = decl.name.clone();
        if self.by_name.contains_key(&name) {
            return Err(CatalogError::DuplicateClass(name));
        }

        let parent = decl.parent.clone();
        let node = self.graph.add_node(decl);
        self.by_name.insert(name.clone(), node);

        if let Some(&parent_node) = parent.as_ref().and_then(|p| self.by_name.get(p)) {
            self.graph.add_edge(node, parent_node, Extends);
        }

        // Link children declared before this class
        let waiting: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&n| n != node && self.graph[n].parent.as_ref() == Some(&name))
            .collect();
        for child in waiting {
            self.graph.add_edge(child, node, Extends);
        }

        Ok(())
    }

    pub fn get(&self, class: &ClassName) -> Option<&ClassDecl> {
        self.by_name.get(class).map(|&node| &self.graph[node])
    }

    pub fn contains(&self, class: &ClassName) -> bool {
        self.by_name.contains_key(class)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn parent_node(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(node, Direction::Outgoing)
            .next()
    }

    /// The class followed by its ancestors, nearest first.
    fn lineage(&self, class: &ClassName) -> Result<Vec<&ClassDecl>, LookupError> {
        let mut node = *self
            .by_name
            .get(class)
            .ok_or_else(|| LookupError::ClassNotFound {
                class: class.clone(),
            })?;
        let mut chain = vec![node];

        while let Some(parent) = &self.graph[node].parent {
            let next = self
                .parent_node(node)
                .ok_or_else(|| LookupError::ClassNotFound {
                    class: parent.clone(),
                })?;
            if chain.contains(&next) {
                return Err(LookupError::CircularInheritance {
                    class: class.clone(),
                });
            }
            chain.push(next);
            node = next;
        }

        Ok(chain.into_iter().map(|n| &self.graph[n]).collect())
    }
}

impl SignatureProvider for ClassCatalog {
    fn resolve_class(&self, class: &ClassName) -> Result<(), LookupError> {
        self.lineage(class).map(|_| ())
    }

    fn constructor(&self, class: &ClassName) -> Result<Option<&MethodSignature>, LookupError> {
        Ok(self
            .lineage(class)?
            .into_iter()
            .find_map(ClassDecl::constructor))
    }

    fn method(&self, class: &ClassName, method: &str) -> Result<&MethodSignature, LookupError> {
        self.lineage(class)?
            .into_iter()
            .find_map(|decl| decl.method(method))
            .ok_or_else(|| LookupError::MethodNotFound {
                class: class.clone(),
                method: method.to_string(),
            })
    }

    fn methods(&self, class: &ClassName) -> Result<Vec<&MethodSignature>, LookupError> {
        let mut methods: Vec<&MethodSignature> = Vec::new();
        for decl in self.lineage(class)?.into_iter().rev() {
            for method in decl.methods() {
                match methods.iter_mut().find(|m| m.name() == method.name()) {
                    Some(existing) => *existing = method,
                    None => methods.push(method),
                }
            }
        }
        Ok(methods)
    }
}
