//! Binding usage tracking.
//!
//! Every binding a pass sees is *observed* once, remembering the first
//! service it was seen on. A binding is *consumed* when a parameter matches
//! it. After the walk, [`BindingUsage::unused`] reports observed bindings that
//! were never consumed: service bindings in the order they were first
//! observed, then container-wide ones.
//!
//! Identity is the [`BindingId`], not the key: two definitions sharing a cloned
//! [`BoundArgument`] share a single usage entry, so consuming it through either
//! definition satisfies both.

use rustc_hash::{FxHashMap, FxHashSet};

use wiring_core::{BindingError, BindingId, BindingKey, BindingSource, BoundArgument, ServiceId};

/// First sighting of a binding.
#[derive(Debug, Clone)]
struct Observed {
    id: BindingId,
    key: BindingKey,
    origin: BindingSource,
    service: Option<ServiceId>,
}

/// Observed and consumed bindings of one pass run.
#[derive(Debug, Default)]
pub struct BindingUsage {
    consumed: FxHashSet<BindingId>,
    observed: Vec<Observed>,
    seen: FxHashMap<BindingId, usize>,
}

impl BindingUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from bindings already consumed by an earlier run.
    pub fn seeded(consumed: &FxHashSet<BindingId>) -> Self {
        Self {
            consumed: consumed.clone(),
            ..Self::default()
        }
    }

    /// Record that `bound` exists under `key`.
    ///
    /// `service` is `None` for container-wide bindings. Only the first
    /// observation of an id is kept.
    pub fn observe(&mut self, service: Option<&ServiceId>, key: &BindingKey, bound: &BoundArgument) {
        let id = bound.id();
        if self.is_observed(id) {
            return;
        }
        self.seen.insert(id, self.observed.len());
        self.observed.push(Observed {
            id,
            key: key.clone(),
            origin: bound.source(),
            service: service.cloned(),
        });
    }

    /// Mark a binding consumed. Returns `true` the first time.
    pub fn consume(&mut self, id: BindingId) -> bool {
        self.consumed.insert(id)
    }

    pub fn is_consumed(&self, id: BindingId) -> bool {
        self.consumed.contains(&id)
    }

    pub fn is_observed(&self, id: BindingId) -> bool {
        self.seen.contains_key(&id)
    }

    pub fn consumed(&self) -> &FxHashSet<BindingId> {
        &self.consumed
    }

    /// One [`BindingError::UnusedBinding`] per observed, unconsumed binding.
    pub fn unused(&self) -> Vec<BindingError> {
        let (services, defaults): (Vec<_>, Vec<_>) = self
            .observed
            .iter()
            .filter(|observed| !self.consumed.contains(&observed.id))
            .partition(|observed| observed.service.is_some());
        services
            .into_iter()
            .chain(defaults)
            .map(|observed| BindingError::UnusedBinding {
                service: observed.service.clone(),
                key: observed.key.clone(),
                origin: observed.origin,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::Reference;

    #[test]
    fn unused_in_first_observed_order() {
        let mut usage = BindingUsage::new();
        let foo = ServiceId::new("foo");
        let a = BoundArgument::new("a");
        let b = BoundArgument::new("b");

        usage.observe(Some(&foo), &BindingKey::parse("$b"), &b);
        usage.observe(Some(&foo), &BindingKey::parse("$a"), &a);

        let unused: Vec<String> = usage
            .unused()
            .iter()
            .map(|e| match e {
                BindingError::UnusedBinding { key, .. } => key.to_string(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(unused, vec!["$b", "$a"]);
    }

    #[test]
    fn defaults_reported_after_services() {
        let mut usage = BindingUsage::new();
        let foo = ServiceId::new("foo");
        let default = BoundArgument::defaults("x");
        let local = BoundArgument::new("y");

        usage.observe(None, &BindingKey::parse("$x"), &default);
        usage.observe(Some(&foo), &BindingKey::parse("$y"), &local);

        let unused = usage.unused();
        assert_eq!(unused.len(), 2);
        assert_eq!(unused[0].service(), Some(&foo));
        assert_eq!(unused[1].service(), None);
    }

    #[test]
    fn shared_binding_observed_once() {
        let mut usage = BindingUsage::new();
        let shared = BoundArgument::new(Reference::new("foo"));
        let key = BindingKey::parse("App::Logger");

        usage.observe(Some(&ServiceId::new("first")), &key, &shared);
        usage.observe(Some(&ServiceId::new("second")), &key, &shared.clone());

        let unused = usage.unused();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].service(), Some(&ServiceId::new("first")));
    }

    #[test]
    fn consumed_binding_not_reported() {
        let mut usage = BindingUsage::new();
        let bound = BoundArgument::new("x");
        usage.observe(Some(&ServiceId::new("foo")), &BindingKey::parse("$x"), &bound);

        assert!(usage.consume(bound.id()));
        assert!(!usage.consume(bound.id()));
        assert!(usage.unused().is_empty());
    }

    #[test]
    fn seeded_consumption_carries_over() {
        let bound = BoundArgument::defaults("x");
        let mut previous = FxHashSet::default();
        previous.insert(bound.id());

        let mut usage = BindingUsage::seeded(&previous);
        usage.observe(None, &BindingKey::parse("$x"), &bound);
        assert!(usage.is_observed(bound.id()));
        assert!(usage.unused().is_empty());
    }
}
