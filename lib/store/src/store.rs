//! The [`SparqlStore`] turns ask queries into SPARQL over the facts it holds.
//!
//! Usage example:
//! ```
//! use askql_store::{SparqlStore, StoreConfig};
//! use askql_compiler::{QueryOptions, SparqlQuery};
//! use oxrdfio::RdfFormat;
//!
//! let store = SparqlStore::new(StoreConfig::default())?;
//! store.load_from_reader(
//!     RdfFormat::Turtle,
//!     br#"<http://example.org/id/Concept-3ACities>
//!         <http://semantic-mediawiki.org/swivt/1.0#conceptQuery> "[[Category:City]]" ."#
//!         .as_ref(),
//! )?;
//!
//! let compiled = store.query("[[Concept:Cities]]", &QueryOptions::default())?;
//! assert!(compiled.errors.is_empty());
//! assert!(matches!(compiled.query, SparqlQuery::Select(_)));
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::{
    parse_triples, ConceptRegistry, HierarchyCache, LoaderError, MemoryFactStore,
    PropertyTypeRegistry, QueryError, RedirectCache, StorageError, StoreConfig,
};
use askql_compiler::{ConditionBuilder, QueryAssembler, QueryOptions, SparqlQuery};
use askql_model::{AskParser, ExportError, Exporter, IriParseError, Triple, WikiPage};
use oxrdfio::RdfParser;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

/// The SPARQL text of an ask query with the diagnostics recorded while compiling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub query: SparqlQuery,
    pub errors: Vec<String>,
}

/// Holds the facts of a wiki together with the caches and registries the compiler consults.
///
/// Every query is compiled by a fresh [`ConditionBuilder`]; the caches are shared between
/// queries until [`SparqlStore::clear_caches`] is called or new facts are loaded.
pub struct SparqlStore {
    config: StoreConfig,
    exporter: Exporter,
    facts: Arc<MemoryFactStore>,
    redirects: Arc<RedirectCache>,
    hierarchy: Arc<HierarchyCache>,
    concepts: Arc<ConceptRegistry>,
    property_types: Arc<PropertyTypeRegistry>,
    assembler: QueryAssembler,
}

impl SparqlStore {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Result<Self, ExportError> {
        let exporter = Exporter::new(&config.wiki_iri)?;
        let facts = Arc::new(MemoryFactStore::new());
        let property_types = Arc::new(PropertyTypeRegistry::new(exporter.clone()));
        for (property, kind) in &config.property_types {
            property_types.declare(property, *kind);
        }
        Ok(Self {
            assembler: QueryAssembler::new(config.compiler.sort_keys.clone()),
            redirects: Arc::new(RedirectCache::new(Arc::clone(&facts) as _)),
            hierarchy: Arc::new(HierarchyCache::new(Arc::clone(&facts) as _)),
            concepts: Arc::new(ConceptRegistry::new(exporter.clone())),
            property_types,
            facts,
            exporter,
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    pub fn facts(&self) -> &MemoryFactStore {
        &self.facts
    }

    pub fn concepts(&self) -> &ConceptRegistry {
        &self.concepts
    }

    pub fn property_types(&self) -> &PropertyTypeRegistry {
        &self.property_types
    }

    /// Loads a file into the store.
    ///
    /// Concept queries and property types are taken from the file in the order they appear, so
    /// a later definition of a concept replaces an earlier one. Returns the number of new facts.
    pub fn load_from_reader(
        &self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<usize, LoaderError> {
        let triples = parse_triples(parser, reader)?;
        Ok(self.extend(triples)?)
    }

    /// Like [`SparqlStore::load_from_reader`], resolving relative IRIs against `base_iri`.
    pub fn load_from_reader_with_base_iri(
        &self,
        parser: impl Into<RdfParser>,
        base_iri: &str,
        reader: impl Read,
    ) -> Result<usize, LoaderError> {
        let parser = parser
            .into()
            .with_base_iri(base_iri)
            .map_err(|error: IriParseError| LoaderError::InvalidBaseIri {
                iri: base_iri.to_owned(),
                error,
            })?;
        self.load_from_reader(parser, reader)
    }

    /// Adds facts to the store.
    ///
    /// The registries only see the triples once the facts hold them.
    pub fn extend(&self, triples: Vec<Triple>) -> Result<usize, StorageError> {
        let added = self.facts.extend(triples.iter().cloned())?;
        let mut concepts = 0;
        let mut property_types = 0;
        for triple in &triples {
            concepts += usize::from(self.concepts.observe(triple));
            property_types += usize::from(self.property_types.observe(triple));
        }
        self.clear_caches();
        info!(added, concepts, property_types, "Extended store");
        Ok(added)
    }

    /// Defines the query of a concept page.
    pub fn define_concept(&self, concept: &WikiPage, query: impl Into<String>) {
        self.concepts.define(concept, query);
    }

    /// Forgets the cached redirects and hierarchy answers.
    pub fn clear_caches(&self) {
        self.redirects.invalidate();
        self.hierarchy.invalidate();
        debug!("Cleared caches");
    }

    /// Compiles an ask query into SPARQL. A limit in `options` overrides the configured one.
    pub fn query(&self, query: &str, options: &QueryOptions) -> Result<CompiledQuery, QueryError> {
        let parser = Arc::new(AskParser::new(Arc::clone(&self.property_types) as _));
        let description = parser.parse(query)?;

        let mut builder = self.condition_builder(parser);
        let condition = builder.build_condition(&description);
        let errors = builder.errors().to_vec();

        let options = QueryOptions {
            limit: options.limit.or(self.config.limit),
            ..*options
        };
        Ok(CompiledQuery {
            query: self.assembler.assemble(&condition, &options),
            errors,
        })
    }

    fn condition_builder(&self, parser: Arc<AskParser>) -> ConditionBuilder {
        ConditionBuilder::new(self.config.compiler.clone(), self.exporter.clone())
            .with_parser(parser)
            .with_property_kinds(Arc::clone(&self.property_types) as _)
            .with_redirect_lookup(Arc::clone(&self.redirects) as _)
            .with_hierarchy_lookup(Arc::clone(&self.hierarchy) as _)
            .with_concept_lookup(Arc::clone(&self.concepts) as _)
    }
}
