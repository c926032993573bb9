//! Layered binding lookup.
//!
//! A [`BindingTable`] is the view a single definition has of the bindings that
//! apply to it: its own bindings first, then the container-wide ones. A local
//! binding shadows a container-wide binding declared under the same key.
//!
//! Lookups have no side effects. Marking a binding consumed is the caller's
//! job.

use wiring_core::{BindingKey, Bindings, BoundArgument};

/// Effective bindings of one definition.
#[derive(Debug, Clone, Copy)]
pub struct BindingTable<'a> {
    local: &'a Bindings,
    defaults: &'a Bindings,
}

impl<'a> BindingTable<'a> {
    pub fn new(local: &'a Bindings, defaults: &'a Bindings) -> Self {
        Self { local, defaults }
    }

    /// Look up a single key.
    pub fn resolve(&self, key: &BindingKey) -> Option<&'a BoundArgument> {
        self.local.get(key).or_else(|| self.defaults.get(key))
    }

    /// Look up candidate keys in order; the first hit wins.
    pub fn resolve_first<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k BindingKey>,
    ) -> Option<(&'k BindingKey, &'a BoundArgument)> {
        keys.into_iter()
            .find_map(|key| self.resolve(key).map(|bound| (key, bound)))
    }

    /// Bindings declared on the definition itself.
    pub fn local(&self) -> &'a Bindings {
        self.local
    }

    /// Container-wide bindings not shadowed by a local key.
    pub fn defaults(&self) -> impl Iterator<Item = (&'a BindingKey, &'a BoundArgument)> + use<'a> {
        let (local, defaults) = (self.local, self.defaults);
        defaults
            .iter()
            .filter(move |(key, _)| !local.contains_key(key))
    }

    /// Every effective binding: local ones in declaration order, then
    /// [`defaults`](Self::defaults).
    pub fn iter(&self) -> impl Iterator<Item = (&'a BindingKey, &'a BoundArgument)> + use<'a> {
        self.local.iter().chain(self.defaults())
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.defaults.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{Argument, Reference};

    #[test]
    fn local_shadows_defaults() {
        let local = Bindings::new().with("$locale", "de");
        let mut defaults = Bindings::new();
        defaults.insert("$locale", BoundArgument::defaults("fr"));
        defaults.insert("$debug", BoundArgument::defaults(true));

        let table = BindingTable::new(&local, &defaults);
        let bound = table.resolve(&BindingKey::parse("$locale")).unwrap();
        assert_eq!(bound.value(), &Argument::from("de"));

        let bound = table.resolve(&BindingKey::parse("$debug")).unwrap();
        assert_eq!(bound.value(), &Argument::from(true));
    }

    #[test]
    fn resolve_first_respects_key_order() {
        let local = Bindings::new()
            .with("App::Logger", Reference::new("logger"))
            .with("App::Logger $audit", Reference::new("audit_logger"));
        let defaults = Bindings::new();
        let table = BindingTable::new(&local, &defaults);

        let keys = [
            BindingKey::typed("App::Logger", "audit"),
            BindingKey::name("audit"),
            BindingKey::ty("App::Logger"),
        ];
        let (key, bound) = table.resolve_first(&keys).unwrap();
        assert_eq!(key.to_string(), "App::Logger $audit");
        assert_eq!(bound.value(), &Argument::from(Reference::new("audit_logger")));
    }

    #[test]
    fn iter_skips_shadowed_defaults() {
        let local = Bindings::new().with("$a", "local");
        let mut defaults = Bindings::new();
        defaults.insert("$a", BoundArgument::defaults("default"));
        defaults.insert("$b", BoundArgument::defaults("default"));

        let table = BindingTable::new(&local, &defaults);
        let keys: Vec<String> = table.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["$a", "$b"]);

        let visible: Vec<String> = table.defaults().map(|(k, _)| k.to_string()).collect();
        assert_eq!(visible, vec!["$b"]);
    }

    #[test]
    fn empty_table() {
        let empty = Bindings::new();
        let table = BindingTable::new(&empty, &empty);
        assert!(table.is_empty());
        assert!(table.resolve(&BindingKey::name("x")).is_none());
    }
}
