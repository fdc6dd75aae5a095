use crate::vocab::{
    owl, rdf, rdfs, swivt, xsd, DEFAULT_WIKI_IRI, HELPER_SUFFIX, PROPERTY_LOCAL_PREFIX,
};
use crate::{ns, DataItem, DataItemKind, ExportError, Property, WikiPage};
use oxiri::Iri;
use oxrdf::vocab::xsd as xsd_types;
use oxrdf::{Literal, NamedNode};

/// A namespace that export elements may be abbreviated with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpNamespace {
    prefix: String,
    iri: String,
}

impl ExpNamespace {
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }

    pub fn rdf() -> Self {
        Self::new(rdf::PREFIX, rdf::NAMESPACE)
    }

    pub fn rdfs() -> Self {
        Self::new(rdfs::PREFIX, rdfs::NAMESPACE)
    }

    pub fn owl() -> Self {
        Self::new(owl::PREFIX, owl::NAMESPACE)
    }

    pub fn xsd() -> Self {
        Self::new(xsd::PREFIX, xsd::NAMESPACE)
    }

    pub fn swivt() -> Self {
        Self::new(swivt::PREFIX, swivt::NAMESPACE)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }
}

/// A resource of the export vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpResource {
    node: NamedNode,
    namespace: Option<(ExpNamespace, String)>,
}

impl ExpResource {
    /// Creates a resource with the local name in the namespace. The local name must be IRI-safe.
    pub fn in_namespace(namespace: &ExpNamespace, local_name: impl Into<String>) -> Self {
        let local_name = local_name.into();
        Self {
            node: NamedNode::new_unchecked(format!("{}{local_name}", namespace.iri)),
            namespace: Some((namespace.clone(), local_name)),
        }
    }

    /// Creates a resource that is not part of a known namespace.
    pub fn from_named_node(node: NamedNode) -> Self {
        Self {
            node,
            namespace: None,
        }
    }

    pub fn named_node(&self) -> &NamedNode {
        &self.node
    }

    pub fn namespace(&self) -> Option<&ExpNamespace> {
        self.namespace.as_ref().map(|(namespace, _)| namespace)
    }

    /// The prefixed name if the local name allows one, the full IRI otherwise.
    pub fn turtle_name(&self) -> String {
        match &self.namespace {
            Some((namespace, local)) if is_valid_local_name(local) => {
                format!("{}:{local}", namespace.prefix)
            }
            _ => self.node.to_string(),
        }
    }
}

/// A resource or a literal, the two things a data item is exported as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpElement {
    Resource(ExpResource),
    Literal(Literal),
}

impl ExpElement {
    /// The namespace the textual name of the element depends on.
    pub fn namespace(&self) -> Option<&ExpNamespace> {
        match self {
            Self::Resource(resource) => resource.namespace(),
            Self::Literal(_) => None,
        }
    }

    /// The textual name of the element in SPARQL syntax.
    pub fn turtle_name(&self) -> String {
        match self {
            Self::Resource(resource) => resource.turtle_name(),
            Self::Literal(literal) => literal.to_string(),
        }
    }
}

impl From<ExpResource> for ExpElement {
    fn from(resource: ExpResource) -> Self {
        Self::Resource(resource)
    }
}

/// Maps the values of the wiki to export elements.
#[derive(Debug, Clone)]
pub struct Exporter {
    wiki: ExpNamespace,
    property: ExpNamespace,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::with_base(DEFAULT_WIKI_IRI)
    }
}

impl Exporter {
    /// Creates an exporter whose pages live below `wiki_iri`.
    pub fn new(wiki_iri: &str) -> Result<Self, ExportError> {
        Iri::parse(wiki_iri.to_owned()).map_err(|error| ExportError::InvalidBaseIri {
            iri: wiki_iri.to_owned(),
            error,
        })?;
        Ok(Self::with_base(wiki_iri))
    }

    fn with_base(wiki_iri: &str) -> Self {
        Self {
            wiki: ExpNamespace::new("wiki", wiki_iri),
            property: ExpNamespace::new("property", format!("{wiki_iri}{PROPERTY_LOCAL_PREFIX}")),
        }
    }

    pub fn wiki_namespace(&self) -> &ExpNamespace {
        &self.wiki
    }

    pub fn property_namespace(&self) -> &ExpNamespace {
        &self.property
    }

    pub fn resource_for_page(&self, page: &WikiPage) -> ExpResource {
        if page.namespace() == ns::PROPERTY {
            ExpResource::in_namespace(&self.property, encode_title(page.db_key()))
        } else {
            ExpResource::in_namespace(&self.wiki, encode_title(&page.prefixed_db_key()))
        }
    }

    /// The resource of a property. Built-in properties with a reserved resource use it.
    pub fn resource_for_property(&self, property: &Property) -> ExpResource {
        if let Some(reserved) = self.reserved_resource_for(property.key()) {
            return reserved;
        }
        ExpResource::in_namespace(&self.property, encode_title(&property.page().db_key()))
    }

    /// The helper property that stores comparable values of properties whose values cannot be
    /// compared directly.
    pub fn helper_resource_for(&self, property: &Property) -> Option<ExpResource> {
        has_helper(property.kind()).then(|| {
            ExpResource::in_namespace(
                &self.property,
                format!("{}{HELPER_SUFFIX}", encode_title(property.page().db_key())),
            )
        })
    }

    /// The resource reserved for a built-in property, if any.
    pub fn reserved_resource_for(&self, key: &str) -> Option<ExpResource> {
        let (namespace, local) = match key {
            "_INST" => (ExpNamespace::rdf(), "type"),
            "_SUBC" => (ExpNamespace::rdfs(), "subClassOf"),
            "_SUBP" => (ExpNamespace::rdfs(), "subPropertyOf"),
            "_REDI" => (ExpNamespace::swivt(), "redirectsTo"),
            "_SKEY" => (ExpNamespace::swivt(), "wikiPageSortKey"),
            "_MDAT" => (ExpNamespace::swivt(), "wikiPageModificationDate"),
            "_CDAT" => (ExpNamespace::swivt(), "wikiPageCreationDate"),
            "_CONC" => (ExpNamespace::swivt(), "conceptQuery"),
            "_TYPE" => (ExpNamespace::swivt(), "type"),
            _ => return None,
        };
        Some(ExpResource::in_namespace(&namespace, local))
    }

    /// A term of the wiki vocabulary (`swivt:page`).
    pub fn swivt_resource(&self, local_name: &str) -> ExpResource {
        ExpResource::in_namespace(&ExpNamespace::swivt(), local_name)
    }

    /// Wraps an IRI, abbreviating it if it lies in the wiki or property namespace.
    pub fn resource_for_named_node(&self, node: NamedNode) -> ExpResource {
        for namespace in [&self.property, &self.wiki] {
            if let Some(local) = node.as_str().strip_prefix(namespace.iri()) {
                return ExpResource {
                    namespace: Some((namespace.clone(), local.to_owned())),
                    node,
                };
            }
        }
        ExpResource::from_named_node(node)
    }

    /// The page an IRI of the wiki or property namespace stands for. Helper properties and IRIs
    /// outside the wiki have no page.
    pub fn page_for_resource(&self, node: &NamedNode) -> Option<WikiPage> {
        if let Some(local) = node.as_str().strip_prefix(self.property.iri()) {
            if local.is_empty() || local.ends_with(HELPER_SUFFIX) {
                return None;
            }
            return Some(WikiPage::new(&decode_title(local), ns::PROPERTY));
        }
        let local = node.as_str().strip_prefix(self.wiki.iri())?;
        (!local.is_empty()).then(|| WikiPage::parse(&decode_title(local)))
    }

    /// Exports a data item. Returns [`None`] if the item has no valid export (e.g. a malformed
    /// URI).
    pub fn element_for(&self, data_item: &DataItem) -> Option<ExpElement> {
        Some(match data_item {
            DataItem::Page(page) => ExpElement::Resource(self.resource_for_page(page)),
            DataItem::Blob(text) => ExpElement::Literal(Literal::new_simple_literal(text)),
            DataItem::Number(number) => ExpElement::Literal(Literal::new_typed_literal(
                number.to_string(),
                xsd_types::DOUBLE,
            )),
            DataItem::Boolean(value) => ExpElement::Literal(Literal::new_typed_literal(
                value.to_string(),
                xsd_types::BOOLEAN,
            )),
            DataItem::Uri(uri) => ExpElement::Resource(ExpResource::from_named_node(
                NamedNode::new(uri.as_str()).ok()?,
            )),
            DataItem::Time(time) => ExpElement::Literal(Literal::new_typed_literal(
                time.to_xsd_date_time(),
                xsd_types::DATE_TIME,
            )),
        })
    }

    /// Exports the comparable helper value of a data item, if its kind has one.
    pub fn helper_element_for(&self, data_item: &DataItem) -> Option<ExpElement> {
        match data_item {
            DataItem::Time(time) => Some(ExpElement::Literal(Literal::new_typed_literal(
                time.julian_day().to_string(),
                xsd_types::DOUBLE,
            ))),
            _ => None,
        }
    }

    /// The sort-key literal of a page.
    pub fn sort_key_element(&self, page: &WikiPage) -> ExpElement {
        ExpElement::Literal(Literal::new_simple_literal(page.sort_key()))
    }

    /// The integer literal that identifies a wiki namespace.
    pub fn namespace_element(&self, namespace: i32) -> ExpElement {
        ExpElement::Literal(Literal::new_typed_literal(
            namespace.to_string(),
            xsd_types::INTEGER,
        ))
    }
}

/// Whether values of the kind are compared through a helper property.
pub fn has_helper(kind: DataItemKind) -> bool {
    kind == DataItemKind::Time
}

/// Encodes a title into an IRI local name. Letters, digits and `_` are kept, every other byte is
/// written as `-XX`.
pub fn encode_title(title: &str) -> String {
    let mut encoded = String::with_capacity(title.len());
    for byte in title.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            encoded.push('-');
            encoded.push_str(&hex::encode_upper([byte]));
        }
    }
    encoded
}

/// Reverses [`encode_title`]. Invalid UTF-8 is replaced lossily.
pub fn decode_title(local_name: &str) -> String {
    let bytes = local_name.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut position = 0;
    while position < bytes.len() {
        if bytes[position] == b'-' {
            let escaped = bytes
                .get(position + 1..position + 3)
                .and_then(|digits| hex::decode(digits).ok());
            if let Some(&[byte]) = escaped.as_deref() {
                decoded.push(byte);
                position += 3;
                continue;
            }
        }
        decoded.push(bytes[position]);
        position += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn is_valid_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphanumeric() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
