use crate::TripleSourceRef;
use askql_compiler::lookup::HierarchyLookup;
use askql_model::vocab::rdfs;
use askql_model::{NamedNode, NamedNodeRef};
use dashmap::DashMap;
use tracing::{debug, warn};

/// Answers whether properties and categories have children, caching one answer per resource.
///
/// A cache miss costs exactly one probe of the facts, limited to a single triple.
pub struct HierarchyCache {
    facts: TripleSourceRef,
    subproperties: DashMap<String, bool>,
    subcategories: DashMap<String, bool>,
}

impl HierarchyCache {
    pub fn new(facts: TripleSourceRef) -> Self {
        Self {
            facts,
            subproperties: DashMap::new(),
            subcategories: DashMap::new(),
        }
    }

    /// Forgets all cached answers.
    pub fn invalidate(&self) {
        self.subproperties.clear();
        self.subcategories.clear();
    }

    fn has_child(
        &self,
        cache: &DashMap<String, bool>,
        relation: NamedNodeRef<'_>,
        parent: &NamedNode,
    ) -> bool {
        if let Some(cached) = cache.get(parent.as_str()) {
            return *cached;
        }
        debug!(parent = %parent, relation = %relation, "Probing hierarchy");
        match self
            .facts
            .triples_matching(None, Some(relation), Some(parent.as_ref().into()), Some(1))
        {
            Ok(children) => {
                let has_child = !children.is_empty();
                cache.insert(parent.as_str().to_owned(), has_child);
                has_child
            }
            Err(error) => {
                warn!(parent = %parent, "Failed to probe hierarchy: {error}");
                false
            }
        }
    }
}

impl HierarchyLookup for HierarchyCache {
    fn has_subproperty_for(&self, property: &NamedNode) -> bool {
        self.has_child(&self.subproperties, rdfs::SUB_PROPERTY_OF, property)
    }

    fn has_subcategory_for(&self, category: &NamedNode) -> bool {
        self.has_child(&self.subcategories, rdfs::SUB_CLASS_OF, category)
    }
}
