use crate::{LoaderError, StorageError};
use askql_model::{Graph, NamedNodeRef, SubjectRef, TermRef, Triple, TripleRef};
use oxrdfio::RdfParser;
use std::io::Read;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Answers triple pattern lookups over the facts of a wiki.
pub trait TripleSource: Send + Sync {
    /// Returns the triples matching the pattern. [`None`] matches anything. At most `limit`
    /// triples are returned if a limit is given.
    fn triples_matching(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        limit: Option<usize>,
    ) -> Result<Vec<Triple>, StorageError>;
}

pub type TripleSourceRef = Arc<dyn TripleSource>;

/// Parses RDF into triples. Named graphs are merged into the default graph.
pub fn parse_triples(
    parser: impl Into<RdfParser>,
    reader: impl Read,
) -> Result<Vec<Triple>, LoaderError> {
    Ok(parser
        .into()
        .rename_blank_nodes()
        .for_reader(reader)
        .map(|quad| quad.map(Triple::from))
        .collect::<Result<Vec<_>, _>>()?)
}

/// Holds the facts of a wiki in memory.
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    graph: RwLock<Graph>,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a file into the store and returns the number of new triples.
    ///
    /// ```
    /// use askql_store::MemoryFactStore;
    /// use oxrdfio::RdfFormat;
    ///
    /// let store = MemoryFactStore::new();
    /// let file = b"<http://example.com/s> <http://example.com/p> <http://example.com/o> .";
    /// assert_eq!(store.load_from_reader(RdfFormat::NTriples, file.as_ref())?, 1);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn load_from_reader(
        &self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<usize, LoaderError> {
        let triples = parse_triples(parser, reader)?;
        Ok(self.extend(triples)?)
    }

    /// Adds the triples and returns how many of them were not already in the store.
    pub fn extend(&self, triples: impl IntoIterator<Item = Triple>) -> Result<usize, StorageError> {
        let mut graph = self.graph.write().map_err(|_| StorageError::Poisoned)?;
        let before = graph.len();
        for triple in triples {
            graph.insert(&triple);
        }
        let added = graph.len() - before;
        info!(added, total = graph.len(), "Loaded facts");
        Ok(added)
    }

    /// Adds a triple. Returns `true` if the triple was not already in the store.
    pub fn insert<'a>(&self, triple: impl Into<TripleRef<'a>>) -> Result<bool, StorageError> {
        let mut graph = self.graph.write().map_err(|_| StorageError::Poisoned)?;
        Ok(graph.insert(triple))
    }

    /// Poisons the lock of the graph.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _graph = self.graph.write();
            panic!("poisoned on purpose");
        }));
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.graph.read().map_err(|_| StorageError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.graph
            .write()
            .map_err(|_| StorageError::Poisoned)?
            .clear();
        Ok(())
    }
}

impl TripleSource for MemoryFactStore {
    fn triples_matching(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        limit: Option<usize>,
    ) -> Result<Vec<Triple>, StorageError> {
        let graph = self.graph.read().map_err(|_| StorageError::Poisoned)?;
        let candidates: Box<dyn Iterator<Item = TripleRef<'_>> + '_> =
            match (subject, object, predicate) {
                (Some(subject), _, _) => Box::new(graph.triples_for_subject(subject)),
                (None, Some(object), _) => Box::new(graph.triples_for_object(object)),
                (None, None, Some(predicate)) => Box::new(graph.triples_for_predicate(predicate)),
                (None, None, None) => Box::new(graph.iter()),
            };
        Ok(candidates
            .filter(|triple| {
                subject.map_or(true, |subject| triple.subject == subject)
                    && predicate.map_or(true, |predicate| triple.predicate == predicate)
                    && object.map_or(true, |object| triple.object == object)
            })
            .take(limit.unwrap_or(usize::MAX))
            .map(TripleRef::into_owned)
            .collect())
    }
}
