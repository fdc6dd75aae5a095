use askql_compiler::lookup::ConceptLookup;
use askql_model::vocab::swivt;
use askql_model::{Exporter, Subject, Term, Triple, WikiPage};
use dashmap::DashMap;
use tracing::debug;

/// Holds the query text of every concept page, keyed by the IRI of the concept.
///
/// Concepts are defined by `swivt:conceptQuery` facts or explicitly. The last definition of a
/// concept wins.
pub struct ConceptRegistry {
    exporter: Exporter,
    queries: DashMap<String, String>,
}

impl ConceptRegistry {
    pub fn new(exporter: Exporter) -> Self {
        Self {
            exporter,
            queries: DashMap::new(),
        }
    }

    /// Defines the query of a concept page.
    pub fn define(&self, concept: &WikiPage, query: impl Into<String>) {
        let resource = self.exporter.resource_for_page(concept);
        self.define_for_resource(resource.named_node().as_str(), query);
    }

    /// Defines the query of the concept with the given IRI.
    pub fn define_for_resource(&self, iri: impl Into<String>, query: impl Into<String>) {
        self.queries.insert(iri.into(), query.into());
    }

    /// Records the definition if the triple is a `swivt:conceptQuery` fact. Returns whether it
    /// was one.
    pub fn observe(&self, triple: &Triple) -> bool {
        if triple.predicate.as_ref() != swivt::CONCEPT_QUERY {
            return false;
        }
        let (Subject::NamedNode(concept), Term::Literal(query)) = (&triple.subject, &triple.object)
        else {
            return false;
        };
        debug!(concept = %concept, query = query.value(), "Defined concept");
        self.define_for_resource(concept.as_str(), query.value());
        true
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl ConceptLookup for ConceptRegistry {
    fn concept_query_text(&self, concept: &WikiPage) -> Option<String> {
        let resource = self.exporter.resource_for_page(concept);
        self.queries
            .get(resource.named_node().as_str())
            .map(|query| query.value().clone())
    }
}
