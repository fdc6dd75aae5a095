use crate::test_utils::{assert_valid_sparql, TestResult, FACTS};
use askql_compiler::{QueryOptions, SparqlQuery};
use askql_model::{AskParseError, DataItemKind, PropertyKindLookup, WikiPage};
use askql_store::{QueryError, SparqlStore, StoreConfig};
use oxrdfio::RdfFormat;

fn create_store(config: StoreConfig) -> Result<SparqlStore, Box<dyn std::error::Error>> {
    let store = SparqlStore::new(config)?;
    store.load_from_reader(RdfFormat::Turtle, FACTS.as_bytes())?;
    Ok(store)
}

fn select_text(query: &SparqlQuery) -> &str {
    match query {
        SparqlQuery::Select(text) => text,
        other => panic!("expected a SELECT query, got {other:?}"),
    }
}

#[test]
fn test_load_feeds_registries() -> TestResult {
    let store = create_store(StoreConfig::default())?;

    assert_eq!(store.facts().len()?, 16);
    assert_eq!(store.concepts().len(), 2);
    assert_eq!(
        store.property_types().kind_of("Population"),
        Some(DataItemKind::Number)
    );
    assert_eq!(
        store.property_types().kind_of("Founded"),
        Some(DataItemKind::Time)
    );
    Ok(())
}

#[test]
fn test_concept_from_facts() -> TestResult {
    let store = create_store(StoreConfig::default().with_limit(Some(50)))?;

    let compiled = store.query("[[Concept:Big cities]]", &QueryOptions::default())?;

    assert!(compiled.errors.is_empty());
    let text = select_text(&compiled.query);
    assert_valid_sparql(text);
    insta::assert_snapshot!(text, @r#"
    PREFIX property: <http://example.org/id/Property-3A>
    PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
    PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
    PREFIX wiki: <http://example.org/id/>
    SELECT DISTINCT ?result WHERE {
    { ?result rdf:type/rdfs:subClassOf* wiki:Category-3ACity . }
    ?result property:Population ?v1 .
    FILTER( ?v1 >= "1000000"^^<http://www.w3.org/2001/XMLSchema#double> )
    }
    LIMIT 50
    "#);
    Ok(())
}

#[test]
fn test_redirects_and_subproperties_from_facts() -> TestResult {
    let store = create_store(StoreConfig::default())?;

    let compiled = store.query("[[Located in::Bln]]", &QueryOptions::default())?;

    let text = select_text(&compiled.query);
    assert_valid_sparql(text);
    assert!(text.contains("rdfs:subPropertyOf* property:Located_in"));
    assert!(text.contains("^swivt:redirectsTo? wiki:Berlin"));
    Ok(())
}

#[test]
fn test_defined_concept_replaces_loaded_one() -> TestResult {
    let store = create_store(StoreConfig::default())?;
    store.define_concept(&WikiPage::concept("Big cities"), "[[Berlin]]");

    let compiled = store.query("[[Concept:Big cities]]", &QueryOptions::default())?;

    assert_eq!(compiled.query, SparqlQuery::Constant("wiki:Berlin".to_owned()));
    Ok(())
}

#[test]
fn test_circular_concept_is_reported() -> TestResult {
    let store = create_store(StoreConfig::default())?;

    let compiled = store.query("[[Concept:Loop]]", &QueryOptions::default())?;

    assert_eq!(compiled.query, SparqlQuery::Empty);
    assert_eq!(
        compiled.errors,
        ["circular concept reference in query \"[[Concept:Loop]]\""]
    );
    Ok(())
}

#[test]
fn test_malformed_query_is_an_error() -> TestResult {
    let store = create_store(StoreConfig::default())?;

    let result = store.query("[[Category:City", &QueryOptions::default());

    assert!(matches!(
        result,
        Err(QueryError::Parse(AskParseError::Syntax { .. }))
    ));
    Ok(())
}

#[test]
fn test_loading_facts_clears_caches() -> TestResult {
    let store = SparqlStore::new(StoreConfig::default())?;

    let before = store.query("[[Located in::Bln]]", &QueryOptions::default())?;
    assert!(!select_text(&before.query).contains("redirectsTo"));

    store.load_from_reader(RdfFormat::Turtle, FACTS.as_bytes())?;
    let after = store.query("[[Located in::Bln]]", &QueryOptions::default())?;
    assert!(select_text(&after.query).contains("^swivt:redirectsTo? wiki:Berlin"));
    Ok(())
}

#[test]
fn test_query_options_override_the_configured_limit() -> TestResult {
    let store = create_store(StoreConfig::default().with_limit(Some(50)))?;

    let compiled = store.query(
        "[[Category:City]]",
        &QueryOptions::default().with_limit(Some(5)).with_offset(10),
    )?;

    let text = select_text(&compiled.query);
    assert!(text.ends_with("}\nLIMIT 5\nOFFSET 10\n"));
    Ok(())
}

#[test]
fn test_count_query() -> TestResult {
    let store = create_store(StoreConfig::default().with_limit(Some(50)))?;

    let compiled = store.query(
        "[[Category:City]] OR [[Population::>>1000000]]",
        &QueryOptions::default().with_count(true),
    )?;

    let text = select_text(&compiled.query);
    assert_valid_sparql(text);
    assert!(text.contains("SELECT (COUNT(DISTINCT ?result) AS ?count) WHERE {"));
    assert!(!text.contains("LIMIT"));
    Ok(())
}

#[test]
fn test_declared_property_types_type_values() -> TestResult {
    let config = StoreConfig::default().with_property_type("Elevation", DataItemKind::Number);
    let store = create_store(config)?;

    let compiled = store.query("[[Elevation::<100]]", &QueryOptions::default())?;

    assert!(select_text(&compiled.query).contains("<http://www.w3.org/2001/XMLSchema#double>"));
    assert!(matches!(
        store.query("[[Elevation::high]]", &QueryOptions::default()),
        Err(QueryError::Parse(AskParseError::InvalidValue(_)))
    ));
    Ok(())
}

#[test]
fn test_invalid_wiki_iri_is_rejected() {
    assert!(SparqlStore::new(StoreConfig::default().with_wiki_iri("not an iri")).is_err());
}
