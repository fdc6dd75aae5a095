use askql_model::vocab::swivt;
use askql_model::{
    ns, DataItemKind, Exporter, Property, PropertyKindLookup, Subject, Term, Triple,
};
use dashmap::DashMap;
use tracing::{debug, warn};

/// Holds the declared kind of user-defined properties, keyed by property key.
///
/// Kinds come from `swivt:type` facts of property pages (e.g. `swivt:_num` or `"_num"`) and from
/// explicit declarations. Properties without a kind hold pages.
pub struct PropertyTypeRegistry {
    exporter: Exporter,
    kinds: DashMap<String, DataItemKind>,
}

impl PropertyTypeRegistry {
    pub fn new(exporter: Exporter) -> Self {
        Self {
            exporter,
            kinds: DashMap::new(),
        }
    }

    /// Declares the kind of a property given by key or label.
    pub fn declare(&self, property: &str, kind: DataItemKind) {
        let property = Property::new(property);
        if property.is_user_defined() {
            self.kinds.insert(property.key().to_owned(), kind);
        }
    }

    /// Records the declaration if the triple is a `swivt:type` fact of a property page. Returns
    /// whether it was one.
    pub fn observe(&self, triple: &Triple) -> bool {
        if triple.predicate.as_ref() != swivt::TYPE {
            return false;
        }
        let Subject::NamedNode(subject) = &triple.subject else {
            return false;
        };
        let Some(page) = self
            .exporter
            .page_for_resource(subject)
            .filter(|page| page.namespace() == ns::PROPERTY)
        else {
            return false;
        };
        let type_id = match &triple.object {
            Term::NamedNode(node) => node
                .as_str()
                .rsplit_once(['#', '/'])
                .map_or(node.as_str(), |(_, local)| local),
            Term::Literal(literal) => literal.value(),
            _ => return false,
        };
        let Some(kind) = DataItemKind::from_type_id(type_id) else {
            warn!(property = %page, type_id, "Unknown property type");
            return false;
        };
        debug!(property = %page, %kind, "Declared property type");
        self.declare(page.db_key(), kind);
        true
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl PropertyKindLookup for PropertyTypeRegistry {
    fn kind_of(&self, property_key: &str) -> Option<DataItemKind> {
        self.kinds.get(property_key).map(|kind| *kind)
    }
}
