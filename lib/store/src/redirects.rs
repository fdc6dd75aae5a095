use crate::TripleSourceRef;
use askql_compiler::lookup::{RedirectLookup, RedirectTarget};
use askql_model::vocab::swivt;
use askql_model::{NamedNode, Term};
use dashmap::DashMap;
use tracing::{debug, warn};

/// Resolves redirects from the `swivt:redirectsTo` facts of a [`TripleSource`](crate::TripleSource).
///
/// Targets are cached per resource until [`RedirectCache::invalidate`] is called.
pub struct RedirectCache {
    facts: TripleSourceRef,
    targets: DashMap<String, RedirectTarget>,
}

impl RedirectCache {
    pub fn new(facts: TripleSourceRef) -> Self {
        Self {
            facts,
            targets: DashMap::new(),
        }
    }

    /// Forgets all cached targets.
    pub fn invalidate(&self) {
        self.targets.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn lookup(&self, resource: &NamedNode) -> Option<RedirectTarget> {
        let redirects = self
            .facts
            .triples_matching(
                Some(resource.as_ref().into()),
                Some(swivt::REDIRECTS_TO),
                None,
                Some(1),
            )
            .inspect_err(|error| warn!(resource = %resource, "Failed to look up redirect: {error}"))
            .ok()?;
        if let Some(Term::NamedNode(target)) = redirects.into_iter().next().map(|t| t.object) {
            return Some(RedirectTarget {
                target,
                existed: true,
            });
        }

        let existed = !self
            .facts
            .triples_matching(Some(resource.as_ref().into()), None, None, Some(1))
            .inspect_err(|error| warn!(resource = %resource, "Failed to look up page: {error}"))
            .ok()?
            .is_empty();
        Some(RedirectTarget {
            target: resource.clone(),
            existed,
        })
    }
}

impl RedirectLookup for RedirectCache {
    fn target_of(&self, resource: &NamedNode) -> RedirectTarget {
        if let Some(target) = self.targets.get(resource.as_str()) {
            return target.clone();
        }
        debug!(resource = %resource, "Redirect cache miss");
        match self.lookup(resource) {
            Some(target) => {
                self.targets
                    .insert(resource.as_str().to_owned(), target.clone());
                target
            }
            // Failed lookups are not cached.
            None => RedirectTarget {
                target: resource.clone(),
                existed: false,
            },
        }
    }
}
