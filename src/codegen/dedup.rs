//! Run-scoped registry of emitted transform helper names.

use std::collections::HashSet;

/// Names of transform helpers already emitted during one generation run.
///
/// Owned by the generation driver and lent mutably to each per-service assembly call, so there is exactly one
/// writer at a time. A helper whose name was already seen is dropped silently, even when its body differs from
/// the one emitted first: helper names are assumed to identify the (param, result) type pair.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: HashSet<String>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `name` is offered in this run and records it; `false` afterwards.
    pub fn should_emit(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string())
    }

    /// Whether `name` has already been emitted.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
