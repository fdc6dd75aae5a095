//! Namespaces and terms of the export vocabulary.

/// The base IRI used for wiki pages when no other is configured.
pub const DEFAULT_WIKI_IRI: &str = "http://example.org/id/";

/// The local-name prefix of property resources within the wiki namespace.
pub const PROPERTY_LOCAL_PREFIX: &str = "Property-3A";

/// The local-name suffix of helper properties.
pub const HELPER_SUFFIX: &str = "-23aux";

pub mod rdf {
    pub const PREFIX: &str = "rdf";
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
}

pub mod rdfs {
    use oxrdf::NamedNodeRef;

    pub const PREFIX: &str = "rdfs";
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    pub const SUB_CLASS_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");
    pub const SUB_PROPERTY_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subPropertyOf");
}

pub mod owl {
    pub const PREFIX: &str = "owl";
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
}

pub mod xsd {
    pub const PREFIX: &str = "xsd";
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
}

/// The Semantic Web Interoperability Vocabulary of the wiki.
pub mod swivt {
    use oxrdf::NamedNodeRef;

    pub const PREFIX: &str = "swivt";
    pub const NAMESPACE: &str = "http://semantic-mediawiki.org/swivt/1.0#";

    pub const PAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#page");
    pub const WIKI_NAMESPACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#wikiNamespace");
    pub const WIKI_PAGE_SORT_KEY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#wikiPageSortKey");
    pub const WIKI_PAGE_MODIFICATION_DATE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://semantic-mediawiki.org/swivt/1.0#wikiPageModificationDate",
    );
    pub const WIKI_PAGE_CREATION_DATE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://semantic-mediawiki.org/swivt/1.0#wikiPageCreationDate",
    );
    pub const REDIRECTS_TO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#redirectsTo");
    pub const CONCEPT_QUERY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#conceptQuery");
    pub const TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semantic-mediawiki.org/swivt/1.0#type");
}
